use std::fmt;

use super::KeyedLock;
use crate::error::LockError;

/// RAII guard for a key held in a [`KeyedLock`]. Dropping it releases the key.
#[must_use = "the key is released as soon as the guard is dropped"]
pub struct KeyGuard<'a> {
    locks: &'a dyn KeyedLock,
    key: String,
}

impl<'a> KeyGuard<'a> {
    /// Block until `key` is held, then wrap it in a guard.
    pub fn acquire(locks: &'a dyn KeyedLock, key: impl Into<String>) -> Self {
        let key = key.into();
        locks.acquire(&key);
        KeyGuard { locks, key }
    }

    /// Take `key` without blocking, or fail with [`LockError::WouldBlock`].
    pub fn try_acquire(
        locks: &'a dyn KeyedLock,
        key: impl Into<String>,
    ) -> Result<Self, LockError> {
        let key = key.into();
        if locks.try_acquire(&key) {
            Ok(KeyGuard { locks, key })
        } else {
            Err(LockError::WouldBlock { key })
        }
    }

    /// Wrap a key the caller already holds.
    pub(crate) fn adopt(locks: &'a dyn KeyedLock, key: String) -> Self {
        KeyGuard { locks, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.locks.release(&self.key);
    }
}

impl fmt::Debug for KeyGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyGuard").field("key", &self.key).finish()
    }
}
