use serde::{Deserialize, Serialize};

/// Declared relation of a primary type, as supplied by the caller
///
/// Exactly one of `model` (to-one) or `collection` (to-many) is expected;
/// when both are set `model` wins. `via` names the inverse attribute on
/// the target type and is carried for hosts but not used for flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDescriptor {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl AssociationDescriptor {
    /// Descriptor for a to-one relation (`alias` holds one `model` entity)
    pub fn to_one(alias: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            model: Some(model.into()),
            collection: None,
            via: None,
        }
    }

    /// Descriptor for a to-many relation (`alias` holds `collection` entities)
    pub fn to_many(alias: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            model: None,
            collection: Some(collection.into()),
            via: None,
        }
    }

    pub fn with_via(mut self, via: impl Into<String>) -> Self {
        self.via = Some(via.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    One,
    Many,
}

/// Descriptor after target-type resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssociation {
    pub alias: String,
    pub kind: RelationKind,
    pub target_type: String,
}
