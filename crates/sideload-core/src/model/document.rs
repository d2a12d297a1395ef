//! The side-loaded output document

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Key under which caller metadata is attached
pub const META_KEY: &str = "meta";

/// Value of the primary type's key; mirrors the shape of the input
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    One(Value),
    Many(Vec<Value>),
}

impl Primary {
    pub fn len(&self) -> usize {
        match self {
            Primary::One(_) => 1,
            Primary::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_value(self) -> Value {
        match self {
            Primary::One(record) => record,
            Primary::Many(records) => Value::Array(records),
        }
    }
}

/// Flat document: primary records, one array per related type, optional meta
///
/// Serializes to `{ <primary>: record | [records], <type>: [entities]..., meta? }`
/// with keys in that order. A related type named `meta` is shadowed by
/// attached metadata; a primary type named `meta` shadows the metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    primary_type: String,
    primary: Primary,
    related: Vec<(String, Vec<Value>)>,
    meta: Option<Value>,
}

impl NormalizedDocument {
    pub fn new(primary_type: impl Into<String>, primary: Primary) -> Self {
        Self {
            primary_type: primary_type.into(),
            primary,
            related: Vec::new(),
            meta: None,
        }
    }

    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn primary(&self) -> &Primary {
        &self.primary
    }

    /// Append a related type; ignored when it collides with the primary type
    /// or was already added
    pub(crate) fn push_related(&mut self, type_name: String, entities: Vec<Value>) -> bool {
        if type_name == self.primary_type || self.related(&type_name).is_some() {
            return false;
        }
        self.related.push((type_name, entities));
        true
    }

    /// Side-loaded entities of one type
    pub fn related(&self, type_name: &str) -> Option<&[Value]> {
        self.related
            .iter()
            .find(|(name, _)| name == type_name)
            .map(|(_, entities)| entities.as_slice())
    }

    /// Related type names in first-declaration order
    pub fn related_types(&self) -> impl Iterator<Item = &str> {
        self.related.iter().map(|(name, _)| name.as_str())
    }

    /// Total number of side-loaded entities across all types
    pub fn sideloaded_count(&self) -> usize {
        self.related.iter().map(|(_, entities)| entities.len()).sum()
    }

    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// Attach caller metadata verbatim; `None` leaves the document meta-free
    pub fn with_meta(mut self, meta: Option<Value>) -> Self {
        self.meta = meta;
        self
    }

    /// Metadata as emitted: hidden when the primary records own `meta`
    fn visible_meta(&self) -> Option<&Value> {
        self.meta
            .as_ref()
            .filter(|_| self.primary_type != META_KEY)
    }

    fn visible_related(&self) -> impl Iterator<Item = &(String, Vec<Value>)> {
        let shadowed = self.visible_meta().is_some();
        self.related
            .iter()
            .filter(move |(name, _)| !(shadowed && name == META_KEY))
    }

    pub fn into_value(self) -> Value {
        let meta = self.visible_meta().cloned();
        let mut map = Map::new();
        map.insert(self.primary_type, self.primary.into_value());
        for (name, entities) in self.related {
            if meta.is_some() && name == META_KEY {
                continue;
            }
            map.insert(name, Value::Array(entities));
        }
        if let Some(meta) = meta {
            map.insert(META_KEY.to_string(), meta);
        }
        Value::Object(map)
    }
}

impl Serialize for NormalizedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.primary {
            Primary::One(record) => map.serialize_entry(&self.primary_type, record)?,
            Primary::Many(records) => map.serialize_entry(&self.primary_type, records)?,
        }
        for (name, entities) in self.visible_related() {
            map.serialize_entry(name, entities)?;
        }
        if let Some(meta) = self.visible_meta() {
            map.serialize_entry(META_KEY, meta)?;
        }
        map.end()
    }
}
