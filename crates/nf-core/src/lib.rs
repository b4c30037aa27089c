//! nf-core: stable foundation for nitroflash.
//!
//! Contains:
//! - units (uom SI types + constructors, oracle unit scales)
//! - numeric (finiteness checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{NfError, NfResult};
pub use numeric::*;
pub use units::*;
