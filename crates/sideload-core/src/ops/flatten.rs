//! Graph flattening: embedded related entities become ids, one level deep
//!
//! Entities of related records are registered in their type's bucket the
//! first time their id is seen. Associations of the related entities
//! themselves are left untouched.

use serde_json::{Map, Value};

use crate::errors::{Result, SideloadError};
use crate::model::{
    Accumulators, Bucket, EntityKey, RelationKind, Related, RelationValue, ResolvedAssociation,
};

const ID_FIELD: &str = "id";

/// Flatten one owned record against resolved associations
///
/// Every association's target type gets a bucket, even when the record
/// does not populate it. To-many entities are always side-loaded; to-one
/// entities only when `send_related_model` is set. Either way the field
/// ends up holding ids. Non-object records and non-entity values are
/// passed through unchanged.
///
/// # Errors
///
/// Returns `MissingIdentifier` when an embedded related entity has no
/// (or a null) `id`.
pub fn flatten_one(
    record: Value,
    associations: &[ResolvedAssociation],
    accumulators: &mut Accumulators,
    send_related_model: bool,
) -> Result<Value> {
    for association in associations {
        accumulators.ensure_bucket(&association.target_type);
    }
    let mut record = match record {
        Value::Object(record) => record,
        other => {
            tracing::debug!(
                associations = associations.len(),
                "primary record is not an object, passing through"
            );
            return Ok(other);
        }
    };

    for association in associations {
        let bucket = accumulators.ensure_bucket(&association.target_type);
        if let Some(slot) = record.get_mut(&association.alias) {
            let value = std::mem::take(slot);
            *slot = rewrite_field(value, association, bucket, send_related_model)?;
        }
    }

    Ok(Value::Object(record))
}

fn rewrite_field(
    value: Value,
    association: &ResolvedAssociation,
    bucket: &mut Bucket,
    send_related_model: bool,
) -> Result<Value> {
    match RelationValue::classify(value) {
        RelationValue::Unpopulated(value) => Ok(value),
        RelationValue::Many(items) => {
            if association.kind == RelationKind::One {
                tracing::debug!(
                    alias = association.alias.as_str(),
                    "to-one association holds a collection, flattening as to-many"
                );
            }
            items
                .into_iter()
                .map(|item| match item {
                    Related::Entity(entity) => register(entity, association, bucket, true),
                    Related::Reference(value) => Ok(value),
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        RelationValue::Single(Related::Entity(entity)) => {
            register(entity, association, bucket, send_related_model)
        }
        RelationValue::Single(Related::Reference(value)) => {
            tracing::debug!(
                alias = association.alias.as_str(),
                "association holds a scalar, leaving it in place"
            );
            Ok(value)
        }
    }
}

/// Side-load `entity` (if `keep` and its id is new) and return its id
fn register(
    entity: Map<String, Value>,
    association: &ResolvedAssociation,
    bucket: &mut Bucket,
    keep: bool,
) -> Result<Value> {
    let id = entity.get(ID_FIELD).cloned().unwrap_or(Value::Null);
    let key = EntityKey::from_id(&id).ok_or_else(|| SideloadError::MissingIdentifier {
        alias: association.alias.clone(),
        target_type: association.target_type.clone(),
    })?;

    if keep {
        bucket.insert_first(key, Value::Object(entity));
    }
    Ok(id)
}
