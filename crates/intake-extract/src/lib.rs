//! # Intake Extract
//!
//! Reading raw values out of a request and assembling a typed record.
//!
//! - [`RequestSources`] - query pairs, path [`Params`] and body of one request
//! - [`coerce`] / [`coerce_field`] - raw text to [`TypedValue`](intake_core::TypedValue),
//!   through a field's registered parser when it has one
//! - [`decode_body`] / [`materialize`] - whole-body decode, then per-field values
//! - [`extract`] - the presence policy and coercion pass over every field
//!
//! ## Example
//!
//! ```
//! use intake_core::{FieldDescriptor, FieldKind, RecordSchema};
//! use intake_extract::{extract, ExtractOptions, Extraction, RequestSources};
//!
//! let schema = RecordSchema::builder()
//!     .field("UserID", "user_id", FieldKind::UnsignedInt)
//!     .build()
//!     .unwrap();
//! let fields = vec![schema
//!     .bind("update_user", FieldDescriptor::path("UserID").required())
//!     .unwrap()];
//!
//! let sources = RequestSources::builder().path_param("user_id", "abc").build();
//! let Extraction::Failed(errors) = extract(&schema, &fields, &sources, &ExtractOptions::default())
//! else {
//!     panic!("expected a coercion failure");
//! };
//! assert_eq!(errors[0].message, "must be a positive integer");
//! ```

#![doc(html_root_url = "https://docs.rs/intake-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod coerce;
mod params;
mod pipeline;
mod source;
mod urlencoded;

pub use body::{
    decode_body, materialize, materialize_field, raw_text, BodyError, BodyFormat, BodyMap,
    DEFAULT_MAX_BODY_SIZE,
};
pub use coerce::{coerce, coerce_custom, coerce_field, coerce_with, CoercionError};
pub use params::Params;
pub use pipeline::{extract, ExtractOptions, Extraction, BODY_FIELD, QUERY_FIELD};
pub use source::{RawValue, RequestSources, RequestSourcesBuilder};
