//! Per-space mutual exclusion for booking and release.
//!
//! The store is keyed by space id and offers no compare-and-set, so the
//! read of `taken` and the write that follows must run under a lock held for
//! that space. Operations on different spaces never contend.
//!
//! Table entries live only while someone holds or waits for them, so the
//! table is bounded by the number of in-flight requests rather than by the
//! number of ids ever requested.

use car_park_core::SpaceId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Table = HashMap<SpaceId, Entry>;

#[derive(Debug, Default)]
struct Entry {
    lock: Arc<AsyncMutex<()>>,
    users: usize,
}

/// Lazily created async mutex per parking space.
#[derive(Debug, Default)]
pub struct SpaceLocks {
    // Held only for map lookups, never across an await.
    locks: Mutex<Table>,
}

impl SpaceLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    ///
    /// The returned guard releases the space when dropped, and removes its
    /// table entry once no other request holds or awaits it.
    pub async fn acquire(&self, id: SpaceId) -> SpaceGuard<'_> {
        let lock = {
            let mut locks = self.table();
            let entry = locks.entry(id).or_default();
            entry.users += 1;
            Arc::clone(&entry.lock)
        };

        // Built before awaiting so a cancelled wait still cleans up.
        let mut guard = SpaceGuard {
            table: self,
            id,
            held: None,
        };
        guard.held = Some(lock.lock_owned().await);
        guard
    }

    /// Number of spaces currently held or awaited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Whether no space is currently held or awaited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> std::sync::MutexGuard<'_, Table> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to one space, released on drop.
#[derive(Debug)]
pub struct SpaceGuard<'a> {
    table: &'a SpaceLocks,
    id: SpaceId,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for SpaceGuard<'_> {
    fn drop(&mut self) {
        self.held.take();

        let mut locks = self.table.table();
        if let Some(entry) = locks.get_mut(&self.id) {
            entry.users -= 1;
            if entry.users == 0 {
                locks.remove(&self.id);
            }
        }
    }
}
