//! Thread-safe access to a single nonce sequence.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::Result;
use crate::nonce::{Nonce, NonceSource};

/// Trait for providing nonces to concurrent request paths.
///
/// This is what a REST client holds, usually as `Arc<dyn NonceProvider>`, so
/// every authenticated request draws from one sequence per API key.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> Result<Nonce>;

    /// Skip `n` positions ahead in the sequence.
    fn advance_by(&self, n: u64) -> Result<()>;

    /// Make sure the next nonce is strictly greater than `observed`.
    fn advance_past(&self, observed: i64) -> Result<()>;
}

/// A [`NonceSource`] behind a mutex.
///
/// Every operation takes the lock for its whole read-modify-write, so
/// concurrent callers never see the same value twice.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use zaif_nonce::nonce::{CounterNonce, NonceProvider, SharedNonce};
///
/// let provider: Arc<dyn NonceProvider> = Arc::new(SharedNonce::new(CounterNonce::new(100)));
/// let body = format!("nonce={}&method=get_info", provider.next_nonce()?);
/// assert_eq!(body, "nonce=100&method=get_info");
/// # Ok::<(), zaif_nonce::NonceError>(())
/// ```
#[derive(Debug, Default)]
pub struct SharedNonce<N> {
    inner: Mutex<N>,
}

impl<N> SharedNonce<N> {
    /// Wrap a nonce source.
    pub fn new(source: N) -> Self {
        Self {
            inner: Mutex::new(source),
        }
    }

    /// Unwrap the nonce source.
    pub fn into_inner(self) -> N {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Sources never leave a half-applied update behind, so a poisoned lock
    // still guards a valid sequence.
    fn lock(&self) -> MutexGuard<'_, N> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<N> NonceProvider for SharedNonce<N>
where
    N: NonceSource + Send,
{
    fn next_nonce(&self) -> Result<Nonce> {
        self.lock().next_nonce()
    }

    fn advance_by(&self, n: u64) -> Result<()> {
        self.lock().advance_by(n)
    }

    fn advance_past(&self, observed: i64) -> Result<()> {
        self.lock().advance_past(observed)
    }
}
