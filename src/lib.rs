//! # Zaif Nonce
//!
//! Strictly increasing nonces for authenticated exchange API requests.
//!
//! The exchange rejects any private request whose nonce is not greater than
//! the last one it accepted for the same API key. This crate provides the
//! strategies that generate those nonces:
//!
//! - [`CounterNonce`](nonce::CounterNonce) counts up from a seed
//! - [`ClockNonce`](nonce::ClockNonce) uses epoch seconds, counting up within a second
//! - [`SharedNonce`](nonce::SharedNonce) shares one sequence across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use zaif_nonce::nonce::{CounterNonce, NonceSource};
//!
//! fn main() -> Result<(), zaif_nonce::NonceError> {
//!     let mut nonce = CounterNonce::new(100);
//!     assert_eq!(nonce.next_nonce()?.to_string(), "100");
//!
//!     nonce.advance_by(5)?;
//!     assert_eq!(nonce.next_nonce()?.to_string(), "106");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod nonce;

// Re-export commonly used types at crate root
pub use config::NonceConfig;
pub use error::NonceError;
pub use nonce::{Nonce, NonceProvider, NonceSource};

/// Result type alias using NonceError
pub type Result<T> = std::result::Result<T, NonceError>;
