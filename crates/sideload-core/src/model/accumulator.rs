//! Per-type dedup buckets filled while flattening

use std::collections::HashMap;

use serde_json::Value;

/// Hashable form of an entity identifier
///
/// Numeric and string ids live in separate key spaces, so `1` and `"1"`
/// are different entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Number(String),
    String(String),
    /// Composite ids (arrays, objects, booleans) keyed by their JSON text
    Other(String),
}

impl EntityKey {
    /// Key for an `id` value; `None` for `null`
    pub fn from_id(id: &Value) -> Option<Self> {
        match id {
            Value::Null => None,
            Value::Number(n) => Some(EntityKey::Number(n.to_string())),
            Value::String(s) => Some(EntityKey::String(s.clone())),
            other => Some(EntityKey::Other(other.to_string())),
        }
    }
}

/// First-write-wins collection of entities of one type
///
/// Entries keep the order in which their ids were first seen.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    entries: Vec<Value>,
    index: HashMap<EntityKey, usize>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` under `key` unless the key is already taken
    ///
    /// Returns `true` when the entity was stored.
    pub fn insert_first(&mut self, key: EntityKey, entity: Value) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(entity);
        true
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.entries
    }

    pub fn into_values(self) -> Vec<Value> {
        self.entries
    }
}

/// All buckets of one document assembly, in first-declaration order
#[derive(Debug, Clone, Default)]
pub struct Accumulators {
    buckets: Vec<(String, Bucket)>,
    index: HashMap<String, usize>,
}

impl Accumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for `type_name`, created empty on first use
    pub fn ensure_bucket(&mut self, type_name: &str) -> &mut Bucket {
        let slot = match self.index.get(type_name) {
            Some(&slot) => slot,
            None => {
                let slot = self.buckets.len();
                self.buckets.push((type_name.to_string(), Bucket::new()));
                self.index.insert(type_name.to_string(), slot);
                slot
            }
        };
        &mut self.buckets[slot].1
    }

    pub fn get(&self, type_name: &str) -> Option<&Bucket> {
        self.index.get(type_name).map(|&slot| &self.buckets[slot].1)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(name, _)| name.as_str())
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_buckets(self) -> impl Iterator<Item = (String, Bucket)> {
        self.buckets.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_write_wins() {
        let mut bucket = Bucket::new();
        let key = EntityKey::from_id(&json!(9)).unwrap();

        assert!(bucket.insert_first(key.clone(), json!({"id": 9, "name": "first"})));
        assert!(!bucket.insert_first(key.clone(), json!({"id": 9, "name": "second"})));

        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.get(&key), Some(&json!({"id": 9, "name": "first"})));
    }

    #[test]
    fn test_numeric_and_string_ids_are_distinct() {
        let numeric = EntityKey::from_id(&json!(1)).unwrap();
        let string = EntityKey::from_id(&json!("1")).unwrap();
        assert_ne!(numeric, string);
    }

    #[test]
    fn test_null_id_has_no_key() {
        assert_eq!(EntityKey::from_id(&json!(null)), None);
    }

    #[test]
    fn test_bucket_keeps_discovery_order() {
        let mut bucket = Bucket::new();
        for id in [3, 1, 2, 1] {
            bucket.insert_first(EntityKey::from_id(&json!(id)).unwrap(), json!({ "id": id }));
        }
        let ids: Vec<_> = bucket.values().iter().map(|v| v["id"].clone()).collect();
        assert_eq!(ids, vec![json!(3), json!(1), json!(2)]);
    }

    #[test]
    fn test_accumulators_keep_declaration_order() {
        let mut acc = Accumulators::new();
        acc.ensure_bucket("user");
        acc.ensure_bucket("tag");
        acc.ensure_bucket("user");

        assert_eq!(acc.len(), 2);
        assert_eq!(acc.type_names().collect::<Vec<_>>(), vec!["user", "tag"]);
        assert!(acc.get("tag").is_some_and(Bucket::is_empty));
    }
}
