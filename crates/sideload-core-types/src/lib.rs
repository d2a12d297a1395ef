//! Core types shared across sideload facilities
//!
//! This crate provides foundational types used by the error handling,
//! logging and response facilities:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
