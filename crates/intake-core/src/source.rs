//! Field source locations.

use crate::{IntakeError, IntakeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a field's raw value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The decoded request payload.
    Body,
    /// URL query string parameters.
    Query,
    /// Named path segments of the resolved route.
    #[serde(alias = "param")]
    Path,
}

impl SourceKind {
    /// Returns the configuration name of this source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = IntakeError;

    fn from_str(s: &str) -> IntakeResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "body" => Ok(Self::Body),
            "query" => Ok(Self::Query),
            "path" | "param" => Ok(Self::Path),
            _ => Err(IntakeError::unknown_source(s)),
        }
    }
}
