use serde_json::{Value, json};

/// Generated value for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Text(String),
    /// Slug values live under a `current` sub-key on the wire.
    Slug(String),
    Number(i64),
    /// Reference marker carrying the id of another document in the batch.
    Reference(String),
    Array(Vec<GeneratedValue>),
}

impl GeneratedValue {
    /// Wire form of the value as the store expects it.
    pub fn to_json(&self) -> Value {
        match self {
            GeneratedValue::Text(value) => Value::String(value.clone()),
            GeneratedValue::Slug(current) => json!({ "current": current }),
            GeneratedValue::Number(value) => json!(value),
            GeneratedValue::Reference(id) => json!({ "_type": "reference", "_ref": id }),
            GeneratedValue::Array(items) => {
                Value::Array(items.iter().map(GeneratedValue::to_json).collect())
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_slug(&self) -> Option<&str> {
        match self {
            GeneratedValue::Slug(current) => Some(current.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            GeneratedValue::Reference(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[GeneratedValue]> {
        match self {
            GeneratedValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}
