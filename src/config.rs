//! Nonce strategy configuration.
//!
//! # Example
//!
//! ```rust
//! use zaif_nonce::config::NonceConfig;
//!
//! let config: NonceConfig =
//!     serde_json::from_str(r#"{"strategy": "counter", "initial_value": 100}"#).unwrap();
//! let provider = config.into_provider();
//! assert_eq!(provider.next_nonce().unwrap().to_string(), "100");
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::nonce::{ClockNonce, CounterNonce, NonceProvider, NonceSource, SharedNonce};

/// Which nonce strategy to use for a credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum NonceConfig {
    /// Count up from `initial_value`
    Counter {
        /// First nonce to emit (non-positive values become 1)
        #[serde(default = "default_initial_value")]
        initial_value: i64,
    },
    /// Epoch seconds from the system clock
    #[default]
    Clock,
}

fn default_initial_value() -> i64 {
    1
}

impl NonceConfig {
    /// Build a fresh nonce source for this configuration.
    pub fn build(&self) -> Box<dyn NonceSource + Send> {
        match *self {
            NonceConfig::Counter { initial_value } => Box::new(CounterNonce::new(initial_value)),
            NonceConfig::Clock => Box::new(ClockNonce::new()),
        }
    }

    /// Build a nonce source wrapped for sharing across request paths.
    pub fn into_provider(self) -> Arc<dyn NonceProvider> {
        tracing::debug!("Creating nonce provider: {:?}", self);
        Arc::new(SharedNonce::new(self.build()))
    }
}
