//! # Intake Test
//!
//! Test utilities for Intake endpoints: a request builder that produces
//! [`RequestSources`](intake_extract::RequestSources) without a server, and
//! assertions on [`Outcome`](intake_core::Outcome)s.
//!
//! ## Example
//!
//! ```ignore
//! use intake_test::{OutcomeAssertions, TestRequest};
//! use serde_json::json;
//!
//! let sources = TestRequest::post("/users")
//!     .json(&json!({ "name": "Al", "email": "al@example.com" }))
//!     .into_sources();
//!
//! endpoint
//!     .process(&sources)
//!     .assert_unprocessable()
//!     .assert_error("Name", "Minimum 3 characters required");
//! ```

#![doc(html_root_url = "https://docs.rs/intake-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assertions;
mod error;
mod request;

pub use assertions::OutcomeAssertions;
pub use error::TestError;
pub use request::TestRequest;
