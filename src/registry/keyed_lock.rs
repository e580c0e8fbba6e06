use std::sync::Arc;

/// A set of exclusive locks addressed by string key.
///
/// Callers bracket a critical section with `acquire(key)` and `release(key)`.
/// Locking one key has no effect on other keys. `LockRegistry` is the
/// in-memory implementation; callers that take a `&dyn KeyedLock` (or a
/// generic `L: KeyedLock`) can be handed a registry scoped to a test.
pub trait KeyedLock: Send + Sync {
    /// Block until the caller exclusively holds the lock for `key`.
    fn acquire(&self, key: &str);

    /// Try to take the lock for `key` without blocking.
    /// Returns `true` if acquired.
    fn try_acquire(&self, key: &str) -> bool;

    /// Release the lock for `key` held by the caller.
    ///
    /// Releasing a key that is not known is a no-op. Releasing a key the
    /// caller does not hold leaves the lock in an unspecified state.
    fn release(&self, key: &str);
}

impl<T: KeyedLock + ?Sized> KeyedLock for Arc<T> {
    fn acquire(&self, key: &str) {
        (**self).acquire(key)
    }

    fn try_acquire(&self, key: &str) -> bool {
        (**self).try_acquire(key)
    }

    fn release(&self, key: &str) {
        (**self).release(key)
    }
}
