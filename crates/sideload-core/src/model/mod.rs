pub mod accumulator;
pub mod association;
pub mod document;
pub mod relation;

pub use accumulator::{Accumulators, Bucket, EntityKey};
pub use association::{AssociationDescriptor, RelationKind, ResolvedAssociation};
pub use document::{NormalizedDocument, Primary, META_KEY};
pub use relation::{Related, RelationValue};
