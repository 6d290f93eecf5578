//! Wall-clock nonce.
//!
//! Nonces are whole seconds since the UNIX epoch. Calls arriving within the
//! same second (or after the clock stepped backward) fall back to counting up
//! from the last emitted value until real time catches up again.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use time::OffsetDateTime;

use crate::Result;
use crate::error::NonceError;
use crate::nonce::{Nonce, NonceSource};

/// A source of epoch-seconds readings.
pub trait Clock {
    /// Current time as whole seconds since the UNIX epoch.
    fn epoch_seconds(&self) -> i64;
}

impl<F> Clock for F
where
    F: Fn() -> i64,
{
    fn epoch_seconds(&self) -> i64 {
        self()
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_seconds(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and hand
/// another to a [`ClockNonce`].
///
/// # Example
///
/// ```rust
/// use zaif_nonce::nonce::{ClockNonce, ManualClock, NonceSource};
///
/// let clock = ManualClock::new(1000);
/// let mut nonce = ClockNonce::with_clock(clock.clone());
///
/// assert_eq!(nonce.next_nonce()?.to_string(), "1000");
/// assert_eq!(nonce.next_nonce()?.to_string(), "1001");
///
/// clock.set(2000);
/// assert_eq!(nonce.next_nonce()?.to_string(), "2000");
/// # Ok::<(), zaif_nonce::NonceError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a clock frozen at `epoch_seconds`.
    pub fn new(epoch_seconds: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(epoch_seconds)),
        }
    }

    /// Set the reading.
    pub fn set(&self, epoch_seconds: i64) {
        self.now.store(epoch_seconds, Ordering::SeqCst);
    }

    /// Move the reading forward (or backward, for negative `seconds`).
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn epoch_seconds(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A nonce source based on epoch seconds.
///
/// Emits the clock reading whenever it is past the last emitted value, and the
/// last value plus one otherwise. The sequence is strictly increasing even
/// under bursts of calls faster than one per second.
#[derive(Debug, Clone)]
pub struct ClockNonce<C = SystemClock> {
    previous: i64,
    clock: C,
}

impl ClockNonce<SystemClock> {
    /// Create a nonce source driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ClockNonce<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ClockNonce<C> {
    /// Create a nonce source driven by a custom clock.
    pub fn with_clock(clock: C) -> Self {
        Self { previous: 0, clock }
    }

    /// The last emitted value, or `0` before the first call.
    pub fn previous(&self) -> i64 {
        self.previous
    }

    /// Get a reference to the underlying clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> NonceSource for ClockNonce<C> {
    fn next_nonce(&mut self) -> Result<Nonce> {
        if self.previous == i64::MAX {
            tracing::warn!("Clock nonce exhausted");
            return Err(NonceError::Exhausted);
        }

        let now = self.clock.epoch_seconds();
        if now > self.previous {
            self.previous = now;
        } else {
            tracing::trace!(
                "Clock at {} has not passed last nonce {}, counting up",
                now,
                self.previous
            );
            self.previous += 1;
        }

        Ok(Nonce::new(self.previous))
    }

    /// Calls [`next_nonce`](NonceSource::next_nonce) `n` times.
    ///
    /// Stops at the first failure. Progress made before the failure is kept,
    /// so a failed call still leaves the source further along than before.
    fn advance_by(&mut self, n: u64) -> Result<()> {
        tracing::debug!("Advancing clock nonce by {} from {}", n, self.previous);
        for _ in 0..n {
            self.next_nonce()?;
        }
        Ok(())
    }

    fn advance_past(&mut self, observed: i64) -> Result<()> {
        if observed > self.previous {
            tracing::debug!("Resyncing clock nonce past {}", observed);
            self.previous = observed;
        }
        Ok(())
    }
}
