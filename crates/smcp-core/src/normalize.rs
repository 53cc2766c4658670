//! Single ingestion boundary for upstream list payloads.
//!
//! The Sentry API answers list endpoints either with a plain JSON array or
//! with an object (keyed by item, or wrapping the array under `data`). Every
//! list payload goes through [`normalize`] before anything else looks at it;
//! no other module branches on payload shape.

use serde_json::{Map, Value};

/// Envelope key some endpoints wrap their item array in.
const DATA_KEY: &str = "data";

/// The shapes a list payload can arrive in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// A plain array of items.
    Sequence(Vec<Value>),
    /// An object whose values are the items.
    Keyed(Map<String, Value>),
    /// Anything else (`null`, a scalar, ...).
    Malformed(Value),
}

impl From<Value> for ResponseShape {
    fn from(payload: Value) -> Self {
        match payload {
            Value::Array(items) => Self::Sequence(items),
            Value::Object(mut map) => {
                if matches!(map.get(DATA_KEY), Some(Value::Array(_))) {
                    match map.remove(DATA_KEY) {
                        Some(Value::Array(items)) => Self::Sequence(items),
                        _ => Self::Keyed(map),
                    }
                } else {
                    Self::Keyed(map)
                }
            }
            other => Self::Malformed(other),
        }
    }
}

impl ResponseShape {
    /// Flatten into an ordered item sequence.
    ///
    /// Sequences come back unchanged; keyed objects yield their values in map
    /// iteration order. A malformed payload yields an empty sequence and a
    /// warning.
    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Sequence(items) => items,
            Self::Keyed(map) => map.into_iter().map(|(_, item)| item).collect(),
            Self::Malformed(payload) => {
                tracing::warn!(
                    payload_type = json_type_name(&payload),
                    "malformed upstream response; treating as empty"
                );
                Vec::new()
            }
        }
    }
}

/// Normalize a raw list payload into an ordered sequence of items.
#[must_use]
pub fn normalize(payload: Value) -> Vec<Value> {
    ResponseShape::from(payload).into_items()
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
