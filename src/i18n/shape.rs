//! Structural shape of resource tree values.
//!
//! Two locales agree on a key when their values have equal shapes: same kind,
//! same list length, same record field set.

use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Text,
    TextList { len: usize },
    RecordList { len: usize, fields: BTreeSet<String> },
    Object { keys: BTreeSet<String> },
    Other(&'static str),
}

impl Shape {
    pub fn of(value: &Value) -> Shape {
        match value {
            Value::String(_) => Shape::Text,
            Value::Object(map) => Shape::Object {
                keys: map.keys().cloned().collect(),
            },
            Value::Array(items) => array_shape(items),
            Value::Number(_) => Shape::Other("number"),
            Value::Bool(_) => Shape::Other("boolean"),
            Value::Null => Shape::Other("null"),
        }
    }
}

fn array_shape(items: &[Value]) -> Shape {
    if items.iter().all(Value::is_string) {
        return Shape::TextList { len: items.len() };
    }

    let mut field_sets = items.iter().map(|item| {
        item.as_object()
            .map(|map| map.keys().cloned().collect::<BTreeSet<_>>())
    });

    let Some(Some(first)) = field_sets.next() else {
        return Shape::Other("mixed list");
    };
    if field_sets.all(|fields| fields.as_ref() == Some(&first)) {
        Shape::RecordList {
            len: items.len(),
            fields: first,
        }
    } else {
        Shape::Other("mixed list")
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Text => write!(f, "text"),
            Shape::TextList { len } => write!(f, "list of {} strings", len),
            Shape::RecordList { len, fields } => write!(
                f,
                "list of {} records {{{}}}",
                len,
                fields.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
            Shape::Object { keys } => write!(f, "object with {} keys", keys.len()),
            Shape::Other(kind) => write!(f, "{}", kind),
        }
    }
}
