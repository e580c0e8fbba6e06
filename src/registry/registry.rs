use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use super::{KeyGuard, KeyedLock};
use crate::config::{ReclaimPolicy, RegistryConfig};
use crate::error::LockError;
use crate::lock::{InMemoryLock, Lock};

/// Per-key bookkeeping. `refs` is only touched while the registry map is locked.
struct Entry {
    lock: Arc<InMemoryLock>,
    refs: usize,
}

impl Entry {
    fn new() -> Self {
        Entry {
            lock: Arc::new(InMemoryLock::new()),
            refs: 0,
        }
    }
}

/// In-process mutual exclusion keyed by string.
///
/// An entry is created the first time a key is acquired and dropped again by
/// `release` according to the configured [`ReclaimPolicy`], so the registry
/// never retains a lock per key ever seen. The map lock is held only for the
/// O(1) lookup; waiting for a key happens on that key's own lock.
///
/// ```
/// use keyed_mutex::LockRegistry;
///
/// let registry = LockRegistry::new();
/// registry.acquire("example.com");
/// // ... mutate records for example.com ...
/// registry.release("example.com");
/// assert!(registry.is_empty());
/// ```
pub struct LockRegistry {
    entries: Mutex<HashMap<String, Entry>>,
    config: RegistryConfig,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_policy(policy: ReclaimPolicy) -> Self {
        Self::with_config(RegistryConfig::default().with_policy(policy))
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        LockRegistry {
            entries: Mutex::new(HashMap::with_capacity(config.initial_capacity)),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn policy(&self) -> ReclaimPolicy {
        self.config.policy
    }

    /// Block until the caller exclusively holds the lock for `key`.
    pub fn acquire(&self, key: &str) {
        let lock = self.checkout(key);
        lock.lock();
    }

    /// Take the lock for `key` if it is free. A failed attempt gives its
    /// reference back, so it never keeps the entry alive.
    pub fn try_acquire(&self, key: &str) -> bool {
        let lock = self.checkout(key);
        if lock.try_lock() {
            return true;
        }
        self.give_back(key, &lock);
        false
    }

    /// Like [`acquire`](Self::acquire), but gives up after `timeout`.
    pub fn acquire_timeout(&self, key: &str, timeout: Duration) -> Result<(), LockError> {
        let lock = self.checkout(key);
        if lock.try_lock_for(timeout) {
            return Ok(());
        }
        self.give_back(key, &lock);
        warn!(key, ?timeout, "timed out waiting for key lock");
        Err(LockError::Timeout {
            key: key.to_owned(),
            waited: timeout,
        })
    }

    /// Acquire using the configured `acquire_timeout_ms`, or wait forever if
    /// none is configured.
    pub fn acquire_default(&self, key: &str) -> Result<(), LockError> {
        match self.config.acquire_timeout() {
            Some(timeout) => self.acquire_timeout(key, timeout),
            None => {
                self.acquire(key);
                Ok(())
            }
        }
    }

    /// Release the lock for `key`.
    ///
    /// Unknown keys are ignored. Releasing a key the caller does not hold,
    /// or releasing twice, leaves that key's lock in an unspecified state.
    pub fn release(&self, key: &str) {
        let lock = {
            let mut entries = self.entries.lock();
            let Some(entry) = entries.get_mut(key) else {
                debug!(key, "release of unknown key ignored");
                return;
            };
            let reclaim = match self.config.policy {
                ReclaimPolicy::Counted => {
                    entry.refs = entry.refs.saturating_sub(1);
                    entry.refs == 0
                }
                ReclaimPolicy::Compat => entry.refs <= 1,
            };
            let lock = Arc::clone(&entry.lock);
            if reclaim {
                entries.remove(key);
                trace!(key, "reclaimed lock entry");
            }
            lock
        };
        lock.unlock();
    }

    /// Block until `key` is held and return a guard that releases it on drop.
    pub fn lock(&self, key: impl Into<String>) -> KeyGuard<'_> {
        KeyGuard::acquire(self, key)
    }

    pub fn try_lock(&self, key: impl Into<String>) -> Result<KeyGuard<'_>, LockError> {
        KeyGuard::try_acquire(self, key)
    }

    pub fn lock_timeout(
        &self,
        key: impl Into<String>,
        timeout: Duration,
    ) -> Result<KeyGuard<'_>, LockError> {
        let key = key.into();
        self.acquire_timeout(&key, timeout)?;
        Ok(KeyGuard::adopt(self, key))
    }

    /// Run `f` while holding the lock for `key`.
    pub fn with_lock<R>(&self, key: &str, f: impl FnOnce() -> R) -> R {
        let _guard = self.lock(key);
        f()
    }

    /// Number of keys that currently have an entry.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Reference count recorded for `key`, if it has an entry.
    pub fn refs(&self, key: &str) -> Option<usize> {
        self.entries.lock().get(key).map(|entry| entry.refs)
    }

    /// Find or create the entry for `key`, count the caller in, and hand out
    /// its lock. The map lock is dropped before the caller waits on it.
    fn checkout(&self, key: &str) -> Arc<InMemoryLock> {
        let mut entries = self.entries.lock();
        let entry = entries.entry(key.to_owned()).or_insert_with(|| {
            trace!(key, "created lock entry");
            Entry::new()
        });
        entry.refs += 1;
        Arc::clone(&entry.lock)
    }

    /// Undo the count taken by `checkout` for an acquisition that never got
    /// the lock.
    fn give_back(&self, key: &str, lock: &Arc<InMemoryLock>) {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        if !Arc::ptr_eq(&entry.lock, lock) {
            return;
        }
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs == 0 {
            entries.remove(key);
            trace!(key, "reclaimed lock entry");
        }
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockRegistry")
            .field("policy", &self.config.policy)
            .field("keys", &self.len())
            .finish()
    }
}

impl KeyedLock for LockRegistry {
    fn acquire(&self, key: &str) {
        LockRegistry::acquire(self, key)
    }

    fn try_acquire(&self, key: &str) -> bool {
        LockRegistry::try_acquire(self, key)
    }

    fn release(&self, key: &str) {
        LockRegistry::release(self, key)
    }
}
