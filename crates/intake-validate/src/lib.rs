//! # Intake Validate
//!
//! Declarative validation rules for assembled records.
//!
//! Rules are written as comma-separated tags, parsed once into a
//! [`RuleSet`], and checked against a [`TypedRecord`](intake_core::TypedRecord)
//! by a [`Validator`].
//!
//! | Tag | Applies to | Message |
//! |-----|-----------|---------|
//! | `required` | any | `This field is required` |
//! | `omitempty` | any | zero value skips the remaining rules |
//! | `min=N` / `max=N` | string, number, list | characters / value / items |
//! | `in=a,b,c` | scalar, or element after `dive` | `Must be one of: a, b, c` |
//! | `unique` | list | `Contains duplicate values` |
//! | `dive` | list | remaining rules apply to each element |
//! | `email` | string | `Invalid email format` |
//! | `create`, `update`, registered groups | any | field only checked in that group |
//!
//! ## Example
//!
//! ```
//! use intake_core::{FieldKind, IntakeError};
//! use intake_validate::Validator;
//!
//! let validator = Validator::builder().build().unwrap();
//! assert!(validator.compile("Name", FieldKind::String, "required,min=3,max=50").is_ok());
//! assert!(matches!(
//!     validator.compile("Name", FieldKind::String, "required,slug"),
//!     Err(IntakeError::UnknownRule { .. })
//! ));
//! ```

#![doc(html_root_url = "https://docs.rs/intake-validate/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod email;
mod message;
mod rule;
mod validator;

pub use email::is_valid_email;
pub use rule::{Bound, Rule, RuleSet};
pub use validator::{FieldRules, RulePredicate, Validator, ValidatorBuilder};
