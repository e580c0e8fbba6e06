//! In-process mutual exclusion keyed by string.
//!
//! Operations on the same key (a DNS zone, a record name, an account id)
//! serialize; operations on different keys run independently. Per-key lock
//! entries are created on first use and reclaimed once released, so the
//! registry does not grow with the number of keys ever seen.

mod config;
mod error;
pub mod lock;
mod registry;

pub use config::{ReclaimPolicy, RegistryConfig};
pub use error::{ConfigError, LockError};
pub use registry::{KeyGuard, KeyedLock, LockRegistry};
