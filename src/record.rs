//! Backend records as they arrive over the wire.
//!
//! Records are kept as JSON objects so that one controller can serve every
//! resource; the [`ResourceSchema`](crate::schema::ResourceSchema) says which
//! keys matter for a given screen.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Record status as understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Active, Status::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            _ => None,
        }
    }

    /// The other status, used by the status dialog toggle.
    pub fn toggled(&self) -> Self {
        match self {
            Status::Active => Status::Inactive,
            Status::Inactive => Status::Active,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a record in its string form.
///
/// The backend uses numeric ids for most resources, but nothing in the
/// client depends on that, so ids are compared and displayed as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A single backend entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON object. Objects without a usable `id` are rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => {
                let id = fields.get("id").and_then(RecordId::from_value)?;
                Some(Self { id, fields })
            }
            _ => None,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Text form of a scalar field. Arrays and objects have no text form.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Raw status string, kept even when it is not a known [`Status`].
    pub fn status_text(&self) -> Option<String> {
        self.text("status")
    }

    pub fn status(&self) -> Option<Status> {
        self.status_text().as_deref().and_then(Status::parse)
    }

    /// Number of embedded related items (e.g. a category's posts).
    pub fn count(&self, key: &str) -> usize {
        match self.get(key) {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    pub fn created_at(&self) -> Option<String> {
        self.text("created_at")
    }

    pub fn updated_at(&self) -> Option<String> {
        self.text("updated_at")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Parse every object in `values`, skipping entries that are not records.
pub fn records_from_values(values: Vec<Value>) -> Vec<Record> {
    values.into_iter().filter_map(Record::from_value).collect()
}
