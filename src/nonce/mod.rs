//! Nonce generation for authenticated exchange requests.
//!
//! The exchange rejects any request whose nonce is not strictly greater than
//! the last nonce it accepted for the same API key. This module provides:
//! - [`NonceSource`], the contract every strategy implements
//! - [`CounterNonce`], a plain sequential counter
//! - [`ClockNonce`], an epoch-seconds counter that never repeats within a second
//! - [`SharedNonce`], a mutex boundary for sharing one sequence across threads

mod clock;
mod counter;
mod shared;

use std::fmt;

use serde::{Serialize, Serializer};

pub use clock::{Clock, ClockNonce, ManualClock, SystemClock};
pub use counter::CounterNonce;
pub use shared::{NonceProvider, SharedNonce};

use crate::Result;

/// A single emitted nonce.
///
/// Displays and serializes as its canonical decimal string, which is what the
/// request signer embeds in the request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonce(i64);

impl Nonce {
    pub(crate) fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the integer value of the nonce.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Nonce> for i64 {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

impl From<Nonce> for String {
    fn from(nonce: Nonce) -> Self {
        nonce.to_string()
    }
}

impl Serialize for Nonce {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A strategy producing a strictly increasing nonce sequence.
///
/// Implementations are plain stateful values. Wrap one in [`SharedNonce`] when
/// more than one caller needs the same sequence.
pub trait NonceSource {
    /// Produce the next nonce.
    ///
    /// The value is greater than every value this instance returned before.
    /// Fails with [`NonceError::Exhausted`](crate::NonceError::Exhausted) when
    /// no larger value can be represented.
    fn next_nonce(&mut self) -> Result<Nonce>;

    /// Skip `n` positions ahead in the sequence.
    ///
    /// The next call to [`next_nonce`](Self::next_nonce) returns a value at
    /// least `n` positions further along than it otherwise would have.
    fn advance_by(&mut self, n: u64) -> Result<()>;

    /// Make sure the next nonce is strictly greater than `observed`.
    ///
    /// Used to resynchronize with a nonce reported by the server. Never moves
    /// the sequence backward.
    fn advance_past(&mut self, observed: i64) -> Result<()>;
}

impl<N> NonceSource for Box<N>
where
    N: NonceSource + ?Sized,
{
    fn next_nonce(&mut self) -> Result<Nonce> {
        (**self).next_nonce()
    }

    fn advance_by(&mut self, n: u64) -> Result<()> {
        (**self).advance_by(n)
    }

    fn advance_past(&mut self, observed: i64) -> Result<()> {
        (**self).advance_past(observed)
    }
}
