//! Document assembly over one record or a list of records

use std::time::Instant;

use serde_json::Value;

use crate::config::{ListPolicy, SideloadConfig};
use crate::errors::{Result, SideloadError};
use crate::model::{Accumulators, AssociationDescriptor, NormalizedDocument, Primary, META_KEY};
use crate::ops::flatten::flatten_one;
use crate::ops::resolve::resolve_all;
use crate::{log_op_end, log_op_error, log_op_start};

const OP: &str = "assemble";

/// Primary input, split by shape once at the boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    One(Value),
    Many(Vec<Value>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Records::One(_) => 1,
            Records::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Value> for Records {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(records) => Records::Many(records),
            other => Records::One(other),
        }
    }
}

impl From<Vec<Value>> for Records {
    fn from(records: Vec<Value>) -> Self {
        Records::Many(records)
    }
}

/// Knobs for one assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembleOptions {
    /// Side-load to-one related entities (to-many ones always are)
    pub send_related_model: bool,
    /// What to do with a list of records when no associations are declared
    pub list_policy: ListPolicy,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            send_related_model: true,
            list_policy: ListPolicy::default(),
        }
    }
}

impl From<&SideloadConfig> for AssembleOptions {
    fn from(config: &SideloadConfig) -> Self {
        Self {
            send_related_model: config.send_related_model,
            list_policy: config.list_without_associations,
        }
    }
}

/// Build the side-loaded document for `records` of type `primary_type`
///
/// The primary key keeps the input shape and order. Every declared
/// association's target type gets an array, in declaration order, with
/// each entity once (first occurrence wins). Buckets whose type equals
/// the primary type are dropped: the primary records own that key.
///
/// Without associations a single record is emitted unflattened and a
/// list is handled according to `options.list_policy`.
///
/// # Errors
///
/// - `ReservedPrimaryType` if `primary_type` is `meta`
/// - `MissingTargetType` if a descriptor has neither model nor collection
/// - `MissingIdentifier` if an embedded related entity has no id
/// - `UnflattenedList` for a list without associations under `ListPolicy::Reject`
pub fn assemble(
    records: Records,
    associations: Option<&[AssociationDescriptor]>,
    primary_type: &str,
    options: &AssembleOptions,
) -> Result<NormalizedDocument> {
    let start = Instant::now();
    log_op_start!(
        OP,
        primary_type = primary_type,
        record_count = records.len(),
        send_related_model = options.send_related_model
    );

    match assemble_document(records, associations, primary_type, options) {
        Ok(doc) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log_op_end!(
                OP,
                duration_ms = duration_ms,
                primary_type = primary_type,
                bucket_count = doc.related_types().count(),
                sideloaded_count = doc.sideloaded_count()
            );
            Ok(doc)
        }
        Err(err) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log_op_error!(OP, &err, duration_ms = duration_ms, primary_type = primary_type);
            Err(err)
        }
    }
}

fn assemble_document(
    records: Records,
    associations: Option<&[AssociationDescriptor]>,
    primary_type: &str,
    options: &AssembleOptions,
) -> Result<NormalizedDocument> {
    if primary_type == META_KEY {
        return Err(SideloadError::ReservedPrimaryType {
            primary_type: primary_type.to_string(),
        });
    }
    let resolved = associations.map(resolve_all).transpose()?;
    let mut accumulators = Accumulators::new();
    for association in resolved.iter().flatten() {
        accumulators.ensure_bucket(&association.target_type);
    }
    let send = options.send_related_model;

    let primary = match (records, resolved) {
        (Records::One(record), Some(associations)) => Primary::One(flatten_one(
            record,
            &associations,
            &mut accumulators,
            send,
        )?),
        (Records::One(record), None) => Primary::One(record),
        (Records::Many(records), Some(associations)) => Primary::Many(
            records
                .into_iter()
                .map(|record| flatten_one(record, &associations, &mut accumulators, send))
                .collect::<Result<Vec<_>>>()?,
        ),
        (Records::Many(records), None) => match options.list_policy {
            ListPolicy::PassThrough => Primary::Many(records),
            ListPolicy::Empty => Primary::Many(Vec::new()),
            ListPolicy::Reject => {
                return Err(SideloadError::UnflattenedList {
                    primary_type: primary_type.to_string(),
                })
            }
        },
    };

    let mut doc = NormalizedDocument::new(primary_type, primary);
    for (type_name, bucket) in accumulators.into_buckets() {
        let dropped = bucket.len();
        if !doc.push_related(type_name, bucket.into_values()) {
            tracing::debug!(
                primary_type = primary_type,
                dropped = dropped,
                "related type equals primary type, keeping primary records only"
            );
        }
    }
    Ok(doc)
}
