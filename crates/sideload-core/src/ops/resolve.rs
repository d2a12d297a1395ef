//! Association resolution: descriptor -> target type and relation kind

use crate::errors::{Result, SideloadError};
use crate::model::{AssociationDescriptor, RelationKind, ResolvedAssociation};

/// Target type name of a descriptor: `model` first, then `collection`
///
/// # Errors
///
/// Returns `MissingTargetType` naming the alias when neither is set.
pub fn resolve_target_type(descriptor: &AssociationDescriptor) -> Result<&str> {
    descriptor
        .model
        .as_deref()
        .or(descriptor.collection.as_deref())
        .ok_or_else(|| SideloadError::MissingTargetType {
            alias: descriptor.alias.clone(),
        })
}

impl AssociationDescriptor {
    /// # Errors
    ///
    /// Returns `MissingTargetType` when the descriptor names no target type.
    pub fn resolve(&self) -> Result<ResolvedAssociation> {
        let target_type = resolve_target_type(self)?.to_string();
        let kind = if self.model.is_some() {
            RelationKind::One
        } else {
            RelationKind::Many
        };
        Ok(ResolvedAssociation {
            alias: self.alias.clone(),
            kind,
            target_type,
        })
    }
}

/// Resolve a whole descriptor list, failing on the first bad entry
///
/// # Errors
///
/// Returns `MissingTargetType` for the first descriptor without a target.
pub fn resolve_all(descriptors: &[AssociationDescriptor]) -> Result<Vec<ResolvedAssociation>> {
    descriptors.iter().map(AssociationDescriptor::resolve).collect()
}
