//! rn-core: shared foundation for refnet.
//!
//! Contains:
//! - ids (compact dense IDs for facilities in a built graph)
//! - numeric (Real + tolerances + lenient finite parsing)
//! - level (facility level tiers and their matching precedence)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod level;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RnError, RnResult};
pub use ids::*;
pub use level::LevelTier;
pub use numeric::*;
