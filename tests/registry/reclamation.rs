use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use keyed_mutex::{LockRegistry, ReclaimPolicy, RegistryConfig};

#[test]
fn sequential_use_leaves_no_entries() {
    for policy in [ReclaimPolicy::Counted, ReclaimPolicy::Compat] {
        let registry = LockRegistry::with_policy(policy);
        for i in 0..100 {
            let key = format!("zone-{}", i % 7);
            registry.acquire(&key);
            assert_eq!(registry.refs(&key), Some(1));
            registry.release(&key);
            assert!(!registry.contains(&key), "{policy:?}");
        }
        assert!(registry.is_empty());
    }
}

#[test]
fn contended_use_is_reclaimed_under_counted_policy() {
    let registry = Arc::new(LockRegistry::new());
    let barrier = Arc::new(Barrier::new(16));

    let workers: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..20 {
                    let key = if i % 2 == 0 { "even" } else { "odd" };
                    registry.acquire(key);
                    thread::yield_now();
                    registry.release(key);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    assert!(registry.is_empty());
}

#[test]
fn contended_key_keeps_entry_under_compat_policy() {
    let registry = Arc::new(LockRegistry::with_policy(ReclaimPolicy::Compat));
    registry.acquire("zone");

    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.acquire("zone");
                registry.release("zone");
            })
        })
        .collect();
    while registry.refs("zone") != Some(4) {
        thread::yield_now();
    }
    registry.release("zone");

    for waiter in waiters {
        waiter.join().unwrap();
    }
    assert_eq!(registry.refs("zone"), Some(4));

    // Other keys are still reclaimed normally.
    registry.acquire("other");
    registry.release("other");
    assert_eq!(registry.len(), 1);
}

#[test]
fn reacquire_after_reclaim_starts_fresh_entry() {
    let registry = LockRegistry::with_policy(ReclaimPolicy::Compat);
    registry.acquire("k");
    registry.release("k");
    assert!(registry.is_empty());

    // A fresh entry starts from zero.
    registry.acquire("k");
    assert_eq!(registry.refs("k"), Some(1));
    registry.release("k");
}

#[test]
fn timed_out_waiters_do_not_pin_entries() {
    let registry = Arc::new(LockRegistry::with_config(
        RegistryConfig::default().with_acquire_timeout(Duration::from_millis(10)),
    ));
    registry.acquire("k");

    let waiters: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.acquire_default("k").is_err())
        })
        .collect();
    for waiter in waiters {
        assert!(waiter.join().unwrap());
    }

    assert_eq!(registry.refs("k"), Some(1));
    registry.release("k");
    assert!(registry.is_empty());
}
