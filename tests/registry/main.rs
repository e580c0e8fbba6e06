//! Keyed lock registry integration tests.
//!
//! - Mutual exclusion per key, independence across keys
//! - Entry reclamation under sequential and contended use
//! - Callers written against the `KeyedLock` trait

mod reclamation;
