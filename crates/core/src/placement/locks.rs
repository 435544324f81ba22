//! Per-owner advisory locks.
//!
//! Placements for one owner run fetch, select and write under the same
//! lock, so two requests from the same owner cannot both pick a slot that
//! only one of them can have. Different owners never contend.
//!
//! An owner's entry lives only while someone holds or waits on its lock;
//! the last guard to drop removes it.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// Clones share the lock table.
#[derive(Debug, Clone, Default)]
pub struct OwnerLocks {
    inner: Arc<LockTable>,
}

/// Holds one owner's lock. Dropping it releases the lock and removes the
/// table entry when nobody else is waiting.
#[derive(Debug)]
pub struct OwnerGuard {
    guard: Option<OwnedMutexGuard<()>>,
    owner: String,
    table: Arc<LockTable>,
}

impl OwnerLocks {
    /// Empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for `owner`'s lock. Released when the guard drops.
    pub async fn lock(&self, owner: &str) -> OwnerGuard {
        let mutex = Arc::clone(self.inner.entry(owner.to_string()).or_default().value());
        let guard = mutex.lock_owned().await;
        OwnerGuard { guard: Some(guard), owner: owner.to_string(), table: Arc::clone(&self.inner) }
    }

    /// Owners currently holding or waiting on a lock.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no owner holds or waits on a lock.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Drop for OwnerGuard {
    fn drop(&mut self) {
        // Release first so the table holds the only remaining reference.
        drop(self.guard.take());
        // Cloning happens under the shard lock, so a count of one here means
        // no waiter can still reach this mutex.
        self.table.remove_if(&self.owner, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
