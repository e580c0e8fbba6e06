use std::time::Duration;

/// Trait for a single exclusive lock.
///
/// Unlike a scoped guard, `unlock` may be called from a different stack frame
/// than the one that called `lock`. The registry relies on this: a key is
/// locked in `acquire` and unlocked in a later, separate `release` call.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self);

    /// Try to acquire the lock without blocking.
    /// Returns `true` if acquired, `false` if already held.
    fn try_lock(&self) -> bool;

    /// Acquire the lock, giving up after `timeout`.
    /// Returns `true` if acquired.
    fn try_lock_for(&self, timeout: Duration) -> bool;

    /// Release the lock, waking one waiter. Unlocking a free lock is a no-op.
    fn unlock(&self);

    fn is_locked(&self) -> bool;
}
