//! Sideload Core - record-graph normalization
//!
//! Converts a primary record (or list of records) with eagerly loaded,
//! embedded related records into a flat side-loaded document:
//!
//! ```json
//! { "post": { "id": 1, "tags": [5, 6] }, "tag": [{ "id": 5 }, { "id": 6 }] }
//! ```
//!
//! This crate provides:
//! - Entity coercion of any `Serialize` payload into owned JSON
//! - Association resolution (`model` / `collection` descriptors)
//! - One-level graph flattening with per-type first-write-wins dedup
//! - Document assembly with optional metadata
//! - A host-agnostic response boundary, configuration, and the error and
//!   logging facilities used throughout
//!
//! ```
//! use serde_json::json;
//! use sideload_core::{assemble, AssembleOptions, AssociationDescriptor, Records};
//!
//! let associations = [AssociationDescriptor::to_many("tags", "tag")];
//! let doc = assemble(
//!     Records::from(json!({"id": 1, "tags": [{"id": 5, "name": "a"}]})),
//!     Some(&associations),
//!     "post",
//!     &AssembleOptions::default(),
//! )?;
//!
//! assert_eq!(
//!     doc.into_value(),
//!     json!({"post": {"id": 1, "tags": [5]}, "tag": [{"id": 5, "name": "a"}]})
//! );
//! # Ok::<(), sideload_core::SideloadError>(())
//! ```

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod response;

pub use sideload_core_types as core_types;

#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use config::{ListPolicy, SideloadConfig};
pub use errors::{ExError, ExErrorKind, Result, SideloadError};
pub use model::{AssociationDescriptor, NormalizedDocument, Primary, RelationKind};
pub use ops::{assemble, coerce, flatten_one, AssembleOptions, Records};
pub use response::{Responder, Response, ResponseContext};
