//! Utilities for cardwatch: small, reusable helpers used across the crate.

pub mod hex;
pub mod strings;
pub mod timeout;

// Re-export the most common helpers at the `utils` module level so callers
// can use `crate::utils::bytes_to_hex_upper(...)` etc if they prefer.
pub use hex::*;
pub use strings::*;
pub use timeout::*;
