mod guard;
mod keyed_lock;
mod registry;

pub use guard::KeyGuard;
pub use keyed_lock::KeyedLock;
pub use registry::LockRegistry;
