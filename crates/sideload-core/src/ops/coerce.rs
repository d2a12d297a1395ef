//! Entity coercion: any serializable record becomes an owned plain value
//!
//! The `Serialize` impl plays the part of a model's "to plain structure"
//! hook. Serializing always yields a fresh tree, so the flattener can
//! rewrite association fields without touching caller-owned data.

use serde::Serialize;
use serde_json::Value;

use crate::errors::Result;
use crate::ops::assemble::Records;

/// Detached plain copy of one record
///
/// # Errors
///
/// Returns `Serialization` if the record's `Serialize` impl fails
/// (e.g. a map with non-string keys).
pub fn coerce<T: Serialize + ?Sized>(record: &T) -> Result<Value> {
    Ok(serde_json::to_value(record)?)
}

/// Coerce a payload and split it into one record or a list of records
///
/// # Errors
///
/// Returns `Serialization` if the payload cannot be serialized.
pub fn coerce_records<T: Serialize + ?Sized>(data: &T) -> Result<Records> {
    coerce(data).map(Records::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Author {
        id: u32,
        name: String,
        #[serde(skip)]
        #[allow(dead_code)]
        password_hash: String,
    }

    #[test]
    fn test_struct_uses_its_serialize_impl() {
        let author = Author {
            id: 4,
            name: "ann".to_string(),
            password_hash: "x".to_string(),
        };
        assert_eq!(coerce(&author).unwrap(), json!({"id": 4, "name": "ann"}));
    }

    #[test]
    fn test_plain_value_is_copied() {
        let original = json!({"id": 1, "tags": [{"id": 5}]});
        let mut copy = coerce(&original).unwrap();
        copy["tags"][0] = json!(5);

        assert_eq!(original["tags"][0], json!({"id": 5}));
    }

    #[test]
    fn test_non_string_keys_fail() {
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], 1);
        assert!(coerce(&bad).is_err());
    }

    #[test]
    fn test_array_payload_becomes_list() {
        let records = coerce_records(&vec![json!({"id": 1}), json!({"id": 2})]).unwrap();
        assert!(matches!(records, Records::Many(ref list) if list.len() == 2));
    }
}
