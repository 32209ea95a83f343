//! # Intake Core
//!
//! Core types shared by every Intake crate.
//!
//! This crate provides the vocabulary the extraction pipeline and the
//! validation engine speak:
//!
//! - [`FieldKind`] / [`TypedValue`] - field shapes and their values
//! - [`TextParser`] - caller-registered parsing for custom field types
//! - [`SourceKind`] - where a field's raw value comes from (body, query, path)
//! - [`RecordSchema`] / [`TypedRecord`] - explicit field tables instead of runtime reflection
//! - [`FieldDescriptor`] / [`BoundField`] - per-endpoint field configuration
//! - [`FieldError`] / [`ErrorResponse`] / [`Outcome`] - what a request produces
//! - [`IntakeError`] - configuration defects detected at build time
//!
//! ## Example
//!
//! ```
//! use intake_core::{FieldKind, RecordSchema, TypedValue};
//!
//! let schema = RecordSchema::builder()
//!     .field("Name", "name", FieldKind::String)
//!     .field("UserID", "user_id", FieldKind::UnsignedInt)
//!     .build()
//!     .unwrap();
//!
//! let mut record = schema.empty_record();
//! record.set("UserID", TypedValue::UnsignedInt(42)).unwrap();
//!
//! assert_eq!(record.get("UserID"), Some(&TypedValue::UnsignedInt(42)));
//! assert_eq!(record.get("Name"), Some(&TypedValue::String(String::new())));
//! ```

#![doc(html_root_url = "https://docs.rs/intake-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod outcome;
mod parser;
mod record;
mod source;
mod value;

pub use descriptor::{BoundField, FieldDescriptor};
pub use error::{FieldError, IntakeError, IntakeResult};
pub use outcome::{ErrorResponse, Outcome};
pub use parser::TextParser;
pub use record::{FieldSpec, RecordSchema, RecordSchemaBuilder, TypedRecord};
pub use source::SourceKind;
pub use value::{FieldKind, TypedValue};

/// Message reported for a required field that is absent or zero.
pub const REQUIRED_MESSAGE: &str = "This field is required";
