//! Sequential counter nonce.

use crate::Result;
use crate::error::NonceError;
use crate::nonce::{Nonce, NonceSource};

/// A nonce source that counts up from a seed.
///
/// `i64::MAX` is reserved and never emitted: reaching it exhausts the source
/// permanently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterNonce {
    value: i64,
    exhausted: bool,
}

impl CounterNonce {
    /// Create a counter whose first nonce is `initial_value`.
    ///
    /// Non-positive seeds are normalized to `1`.
    pub fn new(initial_value: i64) -> Self {
        Self {
            value: initial_value.max(1),
            exhausted: false,
        }
    }

    /// The value the next successful call will emit.
    pub fn current(&self) -> i64 {
        self.value
    }

    /// Whether the counter has run out of values.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn exhaust(&mut self) -> NonceError {
        if !self.exhausted {
            tracing::warn!("Counter nonce exhausted at {}", self.value);
        }
        self.exhausted = true;
        NonceError::Exhausted
    }
}

impl Default for CounterNonce {
    fn default() -> Self {
        Self::new(1)
    }
}

impl NonceSource for CounterNonce {
    fn next_nonce(&mut self) -> Result<Nonce> {
        if self.exhausted || self.value == i64::MAX {
            return Err(self.exhaust());
        }

        let nonce = self.value;
        self.value += 1;
        Ok(Nonce::new(nonce))
    }

    fn advance_by(&mut self, n: u64) -> Result<()> {
        if self.exhausted {
            return Err(NonceError::Exhausted);
        }

        let next = i64::try_from(n)
            .ok()
            .and_then(|by| self.value.checked_add(by))
            .ok_or_else(|| {
                tracing::warn!("Refusing to advance counter nonce {} by {}", self.value, n);
                NonceError::Overflow {
                    current: self.value,
                    by: n,
                }
            })?;

        tracing::debug!("Advancing counter nonce from {} to {}", self.value, next);
        self.value = next;
        Ok(())
    }

    fn advance_past(&mut self, observed: i64) -> Result<()> {
        if self.exhausted {
            return Err(NonceError::Exhausted);
        }
        if observed < self.value {
            return Ok(());
        }

        match observed.checked_add(1) {
            Some(next) => {
                tracing::debug!("Resyncing counter nonce past {}", observed);
                self.value = next;
                Ok(())
            }
            None => {
                self.value = observed;
                Err(self.exhaust())
            }
        }
    }
}
