use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::Lock;

/// Binary lock backed by `Mutex<bool>` + `Condvar`.
///
/// The mutex is only held for the flag flip, so the lock itself can stay
/// "held" across calls without keeping a guard alive.
pub struct InMemoryLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        InMemoryLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) {
        let mut locked = self.state.lock();
        while *locked {
            self.wake.wait(&mut locked);
        }
        *locked = true;
    }

    fn try_lock(&self) -> bool {
        let mut locked = self.state.lock();
        if *locked {
            false
        } else {
            *locked = true;
            true
        }
    }

    fn try_lock_for(&self, timeout: Duration) -> bool {
        // Timeouts past the end of `Instant` mean "wait forever".
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.lock();
            return true;
        };
        let mut locked = self.state.lock();
        while *locked {
            if self.wake.wait_until(&mut locked, deadline).timed_out() {
                // A wakeup may race the deadline.
                if *locked {
                    return false;
                }
                break;
            }
        }
        *locked = true;
        true
    }

    fn unlock(&self) {
        let mut locked = self.state.lock();
        if *locked {
            *locked = false;
            self.wake.notify_one();
        }
    }

    fn is_locked(&self) -> bool {
        *self.state.lock()
    }
}
