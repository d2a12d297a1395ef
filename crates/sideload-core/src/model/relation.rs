//! Tagged view over the value stored under an association alias

use serde_json::{Map, Value};

/// One value found where a related entity may be embedded
#[derive(Debug, Clone, PartialEq)]
pub enum Related {
    /// Structured related entity, to be side-loaded and replaced by its id
    Entity(Map<String, Value>),
    /// Anything else: an id that was already rewritten, or a stray scalar
    Reference(Value),
}

impl From<Value> for Related {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(entity) => Related::Entity(entity),
            other => Related::Reference(other),
        }
    }
}

/// Association field classified by shape
#[derive(Debug, Clone, PartialEq)]
pub enum RelationValue {
    /// Falsy value (`null`, `false`, `0`, `""`): the relation was not populated
    Unpopulated(Value),
    /// To-one: a single related value
    Single(Related),
    /// To-many: a collection of related values
    Many(Vec<Related>),
}

impl RelationValue {
    pub fn classify(value: Value) -> Self {
        if is_falsy(&value) {
            return RelationValue::Unpopulated(value);
        }
        match value {
            Value::Array(items) => {
                RelationValue::Many(items.into_iter().map(Related::from).collect())
            }
            other => RelationValue::Single(Related::from(other)),
        }
    }
}

/// Whether a field counts as "not populated"
///
/// Empty arrays and objects are populated (they are containers, even if
/// they hold nothing).
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
