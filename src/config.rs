use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// When `release` drops a key's entry from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclaimPolicy {
    /// `release` decrements the entry's reference count and removes the entry
    /// once it reaches zero. Entries never outlive their last holder or waiter.
    #[default]
    Counted,
    /// The count only ever grows; `release` removes the entry when it is at most
    /// one. Keys that were ever contended keep their entry forever.
    Compat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub policy: ReclaimPolicy,
    /// Capacity reserved for the key map up front.
    pub initial_capacity: usize,
    /// Bound used by `acquire_default`. `None` waits forever.
    pub acquire_timeout_ms: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            policy: ReclaimPolicy::Counted,
            initial_capacity: 0,
            acquire_timeout_ms: None,
        }
    }
}

impl RegistryConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.acquire_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "acquire_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn with_policy(mut self, policy: ReclaimPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn acquire_timeout(&self) -> Option<Duration> {
        self.acquire_timeout_ms.map(Duration::from_millis)
    }
}
