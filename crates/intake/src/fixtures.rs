//! Pre-built user-service endpoints for tests and demos.
//!
//! All three endpoints share one record schema:
//!
//! | Field | Wire key | Kind |
//! |-------|----------|------|
//! | `Name` | `name` | string |
//! | `Email` | `email` | string |
//! | `Tags` | `tags` | string list |
//! | `IDs` | `ids` | unsigned int list |
//! | `UserID` | `user_id` | unsigned int |
//! | `Rating` | `rating` | int |
//!
//! # Example
//!
//! ```
//! use intake::fixtures;
//! use intake::RequestSources;
//!
//! let registry = fixtures::registry().unwrap();
//! let sources = RequestSources::builder().query("tags=tech").build();
//! let outcome = registry.process("search", &sources).unwrap();
//! assert!(outcome.is_valid());
//! ```

use crate::{Endpoint, EndpointRegistry};
use intake_core::{FieldDescriptor, FieldKind, IntakeResult, RecordSchema};
use intake_validate::Validator;
use std::sync::Arc;

/// The shared user-service record schema.
pub fn user_schema() -> IntakeResult<RecordSchema> {
    RecordSchema::builder()
        .field("Name", "name", FieldKind::String)
        .field("Email", "email", FieldKind::String)
        .field("Tags", "tags", FieldKind::StringList)
        .field("IDs", "ids", FieldKind::UnsignedIntList)
        .field("UserID", "user_id", FieldKind::UnsignedInt)
        .field("Rating", "rating", FieldKind::Int)
        .build()
}

/// A validator knowing the `search` group in addition to the built-in ones.
pub fn validator() -> IntakeResult<Validator> {
    Validator::builder().group("search").build()
}

/// `POST /users`: name and email from the body, optional tags.
pub fn create_user(validator: Arc<Validator>) -> IntakeResult<Endpoint> {
    Endpoint::builder("create_user", user_schema()?, validator)
        .field(
            FieldDescriptor::body("Name")
                .required()
                .rules("required,min=3,max=50"),
        )
        .field(FieldDescriptor::body("Email").required().rules("required,email"))
        .field(FieldDescriptor::body("Tags").rules("omitempty,unique,dive,min=2,max=20"))
        .group("create")
        .created()
        .build()
}

/// `PUT /users/{user_id}`: id from the path, optional name and id list.
pub fn update_user(validator: Arc<Validator>) -> IntakeResult<Endpoint> {
    Endpoint::builder("update_user", user_schema()?, validator)
        .field(FieldDescriptor::path("UserID").required().rules("required,min=1"))
        .field(FieldDescriptor::body("Name").rules("omitempty,min=3,max=50"))
        .field(FieldDescriptor::query("IDs").rules("omitempty,unique,dive,min=1"))
        .group("update")
        .build()
}

/// `GET /search`: required tag filter and a rating defaulting to 5.
pub fn search(validator: Arc<Validator>) -> IntakeResult<Endpoint> {
    Endpoint::builder("search", user_schema()?, validator)
        .field(
            FieldDescriptor::query("Tags")
                .required()
                .rules("required,min=1,max=5,dive,in=tech,sports,politics"),
        )
        .field(
            FieldDescriptor::query("Rating")
                .default_value("5")
                .rules("omitempty,min=1,max=5"),
        )
        .group("search")
        .build()
}

/// All three endpoints sharing one validator.
pub fn registry() -> IntakeResult<EndpointRegistry> {
    let validator = Arc::new(validator()?);
    let mut registry = EndpointRegistry::new();
    registry.register(create_user(Arc::clone(&validator))?)?;
    registry.register(update_user(Arc::clone(&validator))?)?;
    registry.register(search(validator)?)?;
    Ok(registry)
}
