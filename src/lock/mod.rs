mod in_memory;
mod lock;

pub use in_memory::InMemoryLock;
pub use lock::Lock;
