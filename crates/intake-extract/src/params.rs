//! Path parameter storage.
//!
//! Holds the named segments a router resolved for the current request.
//! Small-vector storage keeps the common one-to-four parameter case off the heap.

use smallvec::SmallVec;

/// Maximum number of parameters stored inline.
const INLINE_PARAMS: usize = 4;

/// Named path segments of a resolved route, e.g. `user_id` for `/users/{user_id}`.
///
/// # Example
///
/// ```rust
/// use intake_extract::Params;
///
/// let mut params = Params::new();
/// params.push("user_id", "42");
///
/// assert_eq!(params.get("user_id"), Some("42"));
/// assert_eq!(params.get("team_id"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter. A later duplicate never shadows an earlier one.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut params = Params::new();
        params.push("user_id", "7");
        params.push("team", "core");

        assert_eq!(params.get("user_id"), Some("7"));
        assert_eq!(params.get("team"), Some("core"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_first_binding_wins() {
        let params: Params = [("id", "1"), ("id", "2")].into_iter().collect();
        assert_eq!(params.get("id"), Some("1"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let mut params = Params::new();
        params.push("slug", "");
        assert_eq!(params.get("slug"), Some(""));
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let params: Params = (0..10).map(|i| (format!("k{i}"), format!("v{i}"))).collect();
        assert_eq!(params.len(), 10);
        assert_eq!(params.get("k9"), Some("v9"));
        assert_eq!(params.iter().next(), Some(("k0", "v0")));
    }
}
