//! Named endpoint tables.

use crate::Endpoint;
use indexmap::IndexMap;
use intake_core::{IntakeError, IntakeResult, Outcome};
use intake_extract::RequestSources;

/// Endpoints keyed by name, in registration order.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: IndexMap<String, Endpoint>,
}

impl EndpointRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::DuplicateEndpoint`] if the name is taken.
    pub fn register(&mut self, endpoint: Endpoint) -> IntakeResult<()> {
        if self.endpoints.contains_key(endpoint.name()) {
            return Err(IntakeError::duplicate_endpoint(endpoint.name()));
        }
        self.endpoints.insert(endpoint.name().to_string(), endpoint);
        Ok(())
    }

    /// Looks up an endpoint by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.get(name)
    }

    /// Processes a request against the named endpoint, if it exists.
    #[must_use]
    pub fn process(&self, name: &str, sources: &RequestSources) -> Option<Outcome> {
        self.get(name).map(|endpoint| endpoint.process(sources))
    }

    /// Iterates over the endpoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    /// Number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true if no endpoints are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
