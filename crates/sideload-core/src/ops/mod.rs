pub mod assemble;
pub mod coerce;
pub mod flatten;
pub mod resolve;

pub use assemble::{assemble, AssembleOptions, Records};
pub use coerce::{coerce, coerce_records};
pub use flatten::flatten_one;
pub use resolve::{resolve_all, resolve_target_type};
