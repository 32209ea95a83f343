//! # Intake
//!
//! **Declarative request decoding and validation**
//!
//! Describe each field of an endpoint once (where it comes from, whether it
//! is required, its default, its rules) and Intake turns every request into
//! one of three outcomes:
//!
//! - `400 Bad Request` when a field is missing or cannot be coerced,
//! - `422 Unprocessable Entity` when a coerced value breaks a rule,
//! - `200 OK` (or `201 Created`) with the typed record.
//!
//! ## Quick Start
//!
//! ```rust
//! use intake::prelude::*;
//! use std::sync::Arc;
//!
//! let schema = RecordSchema::builder()
//!     .field("UserID", "user_id", FieldKind::UnsignedInt)
//!     .field("IDs", "ids", FieldKind::UnsignedIntList)
//!     .build()
//!     .unwrap();
//! let validator = Arc::new(Validator::builder().build().unwrap());
//!
//! let endpoint = Endpoint::builder("update_user", schema, validator)
//!     .field(FieldDescriptor::path("UserID").required().rules("required,min=1"))
//!     .field(FieldDescriptor::query("IDs").rules("omitempty,unique,dive,min=1"))
//!     .group("update")
//!     .build()
//!     .unwrap();
//!
//! let sources = RequestSources::builder()
//!     .path_param("user_id", "7")
//!     .query("ids=1,2,3")
//!     .build();
//!
//! let record = endpoint.process(&sources).into_record().unwrap();
//! assert_eq!(record.get("IDs"), Some(&TypedValue::from(vec![1_u64, 2, 3])));
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! RequestSources → lookup → presence policy → coerce ─┬─ errors → 400
//!                                                     └─ record → validate ─┬─ errors → 422
//!                                                                           └─ ok     → 200
//! ```

#![doc(html_root_url = "https://docs.rs/intake/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod endpoint;
pub mod fixtures;
mod registry;
mod response;

pub use endpoint::{process, Endpoint, EndpointBuilder};
pub use registry::EndpointRegistry;
pub use response::into_response;

pub use intake_core as core;
pub use intake_extract as extract;
pub use intake_validate as validate;

// Re-export core types
pub use intake_core::{
    BoundField, ErrorResponse, FieldDescriptor, FieldError, FieldKind, IntakeError, IntakeResult,
    Outcome, RecordSchema, SourceKind, TextParser, TypedRecord, TypedValue,
};

// Re-export extraction types
pub use intake_extract::{Params, RequestSources};

// Re-export validation types
pub use intake_validate::Validator;

/// Prelude module for convenient imports.
///
/// ```rust
/// use intake::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{process, Endpoint, EndpointRegistry};

    pub use intake_core::{
        ErrorResponse, FieldDescriptor, FieldError, FieldKind, IntakeError, IntakeResult,
        Outcome, RecordSchema, SourceKind, TextParser, TypedRecord, TypedValue,
    };

    pub use intake_extract::{Params, RequestSources};

    pub use intake_validate::Validator;
}
