use std::time::Duration;

use thiserror::Error;

/// Error type for lock operations.
///
/// Plain `acquire`/`release` never fail; only the bounded variants do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The lock for `key` was not acquired within `waited`.
    #[error("lock for key {key:?} not acquired within {waited:?}")]
    Timeout { key: String, waited: Duration },
    /// The lock for `key` is currently held and the caller asked not to wait.
    #[error("lock for key {key:?} is held")]
    WouldBlock { key: String },
}

/// Error type for loading a [`RegistryConfig`](crate::RegistryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid registry config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid registry config: {0}")]
    Invalid(String),
}
