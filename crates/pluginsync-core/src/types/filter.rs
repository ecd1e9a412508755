//! Equality filters for document lookups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field name holding a document's primary key.
pub const ID_FIELD: &str = "id";

/// A conjunction of top-level field equality constraints.
///
/// Serialized as a plain JSON object so that backends can use it directly
/// as a containment pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentFilter {
    fields: Map<String, Value>,
}

impl DocumentFilter {
    /// Create an empty filter that matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the document primary key.
    pub fn by_id(id: &Uuid) -> Self {
        Self::new().eq(ID_FIELD, id.to_string())
    }

    /// Add an equality constraint.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// The constraint on the primary key, if any.
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).and_then(Value::as_str)
    }

    /// The remaining constraints once the primary key is matched by the
    /// backend itself.
    ///
    /// The body's `id` text is not compared, so a key stored in another
    /// UUID spelling still matches.
    pub fn without_id(&self) -> Self {
        let mut fields = self.fields.clone();
        fields.remove(ID_FIELD);
        Self { fields }
    }

    /// Whether `document` satisfies every constraint.
    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// The filter as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Whether the filter has no constraints.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
