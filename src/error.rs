//! Error types for nonce generation.

use thiserror::Error;

/// The error type for all nonce operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceError {
    /// The 64-bit signed integer domain has been consumed.
    ///
    /// Fatal for the instance: every later `next_nonce` call fails the same way.
    #[error("Nonce exhausted: no value larger than the last one can be represented")]
    Exhausted,

    /// Advancing the counter would overflow the 64-bit signed range.
    #[error("Nonce overflow: cannot advance {current} by {by}")]
    Overflow {
        /// The value the counter would have emitted next
        current: i64,
        /// The requested advancement
        by: u64,
    },
}

impl NonceError {
    /// Check if this error permanently disables the nonce source.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, NonceError::Exhausted)
    }
}
