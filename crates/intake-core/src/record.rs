//! Record schemas and typed records.
//!
//! A [`RecordSchema`] is the explicit replacement for iterating struct fields
//! by tag at runtime: it is an ordered table from logical field name to wire
//! key and [`FieldKind`], built once. A [`TypedRecord`] is one request's worth
//! of values for that table.

use crate::{FieldKind, IntakeError, IntakeResult, TextParser, TypedValue};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// One declared field: logical name, wire key, and kind.
///
/// Fields of [`FieldKind::Custom`] also carry the [`TextParser`] that
/// coerces their raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    key: String,
    kind: FieldKind,
    parser: Option<TextParser>,
}

impl FieldSpec {
    /// Creates a field spec.
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            kind,
            parser: None,
        }
    }

    /// Creates a custom-typed field coerced by `parser`.
    #[must_use]
    pub fn custom(name: impl Into<String>, key: impl Into<String>, parser: TextParser) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            kind: FieldKind::Custom,
            parser: Some(parser),
        }
    }

    /// Logical field name used in error reports (e.g. `UserID`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire key looked up in the request (e.g. `user_id`).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Target kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The registered parser, for custom-typed fields.
    #[must_use]
    pub fn parser(&self) -> Option<&TextParser> {
        self.parser.as_ref()
    }
}

/// Ordered table of the fields a record can carry.
///
/// # Example
///
/// ```
/// use intake_core::{FieldKind, RecordSchema};
///
/// let schema = RecordSchema::builder()
///     .field("Tags", "tags", FieldKind::StringList)
///     .field("IDs", "ids", FieldKind::UnsignedIntList)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.get("IDs").unwrap().key(), "ids");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    fields: Arc<IndexMap<String, FieldSpec>>,
}

impl RecordSchema {
    /// Creates a new schema builder.
    #[must_use]
    pub fn builder() -> RecordSchemaBuilder {
        RecordSchemaBuilder::default()
    }

    /// Looks up a field by logical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Iterates over the fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Creates a record with every field at its zero value.
    #[must_use]
    pub fn empty_record(&self) -> TypedRecord {
        let values = self
            .fields
            .values()
            .map(|spec| (spec.name.clone(), spec.kind.zero()))
            .collect();
        TypedRecord {
            schema: self.clone(),
            values,
        }
    }
}

/// Builder for [`RecordSchema`].
#[derive(Debug, Default)]
pub struct RecordSchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl RecordSchemaBuilder {
    /// Declares a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, key: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::new(name, key, kind));
        self
    }

    /// Declares a field of a caller-defined type.
    ///
    /// ```
    /// use intake_core::{FieldKind, RecordSchema, TextParser};
    /// use std::net::IpAddr;
    ///
    /// let schema = RecordSchema::builder()
    ///     .custom_field("Addr", "addr", TextParser::of::<IpAddr>("ip address"))
    ///     .build()
    ///     .unwrap();
    /// let addr = schema.get("Addr").unwrap();
    /// assert_eq!(addr.kind(), FieldKind::Custom);
    /// assert_eq!(addr.parser().map(TextParser::label), Some("ip address"));
    /// ```
    #[must_use]
    pub fn custom_field(
        mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        parser: TextParser,
    ) -> Self {
        self.fields.push(FieldSpec::custom(name, key, parser));
        self
    }

    /// Declares a field from a prepared spec.
    #[must_use]
    pub fn spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::DuplicateField`] when a name or wire key repeats.
    pub fn build(self) -> IntakeResult<RecordSchema> {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for spec in self.fields {
            if fields.contains_key(&spec.name) {
                return Err(IntakeError::duplicate_field(spec.name));
            }
            if fields.values().any(|f: &FieldSpec| f.key == spec.key) {
                return Err(IntakeError::duplicate_field(spec.key));
            }
            fields.insert(spec.name.clone(), spec);
        }
        Ok(RecordSchema {
            fields: Arc::new(fields),
        })
    }
}

/// The assembled values of one request.
///
/// Serializes as a JSON object keyed by wire key, so it can be echoed back
/// or bound to a caller-defined struct with [`TypedRecord::deserialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedRecord {
    schema: RecordSchema,
    values: IndexMap<String, TypedValue>,
}

impl TypedRecord {
    /// Returns a field's value by logical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.values.get(name)
    }

    /// Assigns a field's value.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is not declared or the value has the
    /// wrong kind.
    pub fn set(&mut self, name: &str, value: TypedValue) -> IntakeResult<()> {
        let spec = self
            .schema
            .get(name)
            .ok_or_else(|| IntakeError::unknown_field("record", name))?;
        if spec.kind != value.kind() {
            return Err(IntakeError::KindMismatch {
                field: name.to_string(),
                expected: spec.kind.to_string(),
                actual: value.kind().to_string(),
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Iterates `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The schema this record was built against.
    #[must_use]
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Renders the record as a JSON object keyed by wire key.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Binds the record to a caller-defined type.
    ///
    /// # Example
    ///
    /// ```
    /// use intake_core::{FieldKind, RecordSchema, TypedValue};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Search {
    ///     tags: Vec<String>,
    ///     rating: i64,
    /// }
    ///
    /// let schema = RecordSchema::builder()
    ///     .field("Tags", "tags", FieldKind::StringList)
    ///     .field("Rating", "rating", FieldKind::Int)
    ///     .build()
    ///     .unwrap();
    /// let mut record = schema.empty_record();
    /// record.set("Rating", TypedValue::Int(5)).unwrap();
    ///
    /// let search: Search = record.deserialize().unwrap();
    /// assert_eq!(search.rating, 5);
    /// assert!(search.tags.is_empty());
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}

impl Serialize for TypedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for spec in self.schema.iter() {
            if let Some(value) = self.values.get(spec.name()) {
                map.serialize_entry(spec.key(), value)?;
            }
        }
        map.end()
    }
}
