//! hn-core: stable foundation for hydronet.
//!
//! Contains:
//! - ids (element identifiers and export keys)
//! - numeric (Real + finiteness checks + token parsing)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HnError, HnResult};
pub use ids::*;
pub use numeric::*;
