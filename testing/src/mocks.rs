//! In-memory hierarchy store for fast, deterministic tests.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use car_park_core::seed::FlatHierarchy;
use car_park_core::{
    HierarchyStore, Level, LevelId, Parking, ParkingId, ParkingSpace, Row, RowId, SeedData,
    SeedError, SpaceId, StoreError, StoreFuture,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    parking_order: Vec<ParkingId>,
    parkings: HashMap<ParkingId, Parking>,
    levels: HashMap<LevelId, Level>,
    rows: HashMap<RowId, Row>,
    spaces: HashMap<SpaceId, ParkingSpace>,
}

impl Inner {
    fn apply(&mut self, flat: FlatHierarchy) {
        for parking in flat.parkings {
            self.insert_parking(parking);
        }
        for level in flat.levels {
            self.levels.insert(level.id, level);
        }
        for row in flat.rows {
            self.rows.insert(row.id, row);
        }
        for space in flat.spaces {
            self.spaces.insert(space.id, space);
        }
    }

    fn insert_parking(&mut self, parking: Parking) {
        if !self.parkings.contains_key(&parking.id) {
            self.parking_order.push(parking.id);
        }
        self.parkings.insert(parking.id, parking);
    }
}

/// `HashMap`-backed [`HierarchyStore`].
///
/// Clones share the same contents. The store starts empty unless built with
/// [`populated`](Self::populated); [`initialize`](HierarchyStore::initialize)
/// applies the seed dataset only while the store holds no parkings and counts
/// every call, so tests can assert how often seeding was requested.
///
/// # Example
///
/// ```
/// use car_park_core::HierarchyStore;
/// use car_park_testing::{demo_seed, InMemoryHierarchyStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryHierarchyStore::with_seed(demo_seed());
/// assert!(store.list_parkings().await?.is_empty());
///
/// store.initialize().await?;
/// assert_eq!(store.list_parkings().await?.len(), 2);
/// assert_eq!(store.initialize_calls(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryHierarchyStore {
    inner: Arc<RwLock<Inner>>,
    seed: Arc<SeedData>,
    initialize_calls: Arc<AtomicUsize>,
    failure: Arc<RwLock<Option<StoreError>>>,
    latency: Option<Duration>,
}

impl InMemoryHierarchyStore {
    /// Create an empty store whose seed dataset is also empty.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(SeedData::default())
    }

    /// Create an empty store that seeds itself from `seed` on initialization.
    #[must_use]
    pub fn with_seed(seed: SeedData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            seed: Arc::new(seed),
            initialize_calls: Arc::new(AtomicUsize::new(0)),
            failure: Arc::new(RwLock::new(None)),
            latency: None,
        }
    }

    /// Create a store already holding the contents of `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DuplicateId`] if the dataset repeats an id.
    pub fn populated(seed: SeedData) -> Result<Self, SeedError> {
        let flat = seed.flatten()?;
        let store = Self::with_seed(seed);
        store.inner.write().unwrap().apply(flat);
        Ok(store)
    }

    /// Delay every operation by `latency` to widen race windows.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every subsequent operation fail with `error` (or succeed again
    /// with `None`).
    pub fn fail_with(&self, error: Option<StoreError>) {
        *self.failure.write().unwrap() = error;
    }

    /// How many times `initialize` has been called.
    #[must_use]
    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    /// Current copy of a space.
    #[must_use]
    pub fn space(&self, id: SpaceId) -> Option<ParkingSpace> {
        self.inner.read().unwrap().spaces.get(&id).cloned()
    }

    /// Current copy of a level.
    #[must_use]
    pub fn level(&self, id: LevelId) -> Option<Level> {
        self.inner.read().unwrap().levels.get(&id).cloned()
    }

    /// Insert or replace a parking. New parkings are appended to the listing order.
    pub fn insert_parking(&self, parking: Parking) {
        self.inner.write().unwrap().insert_parking(parking);
    }

    /// Insert or replace a level without touching its parent's level list.
    pub fn insert_level(&self, level: Level) {
        self.inner.write().unwrap().levels.insert(level.id, level);
    }

    /// Insert or replace a row without touching its parent's row list.
    pub fn insert_row(&self, row: Row) {
        self.inner.write().unwrap().rows.insert(row.id, row);
    }

    /// Insert or replace a space without touching its parent's space list.
    pub fn insert_space(&self, space: ParkingSpace) {
        self.inner.write().unwrap().spaces.insert(space.id, space);
    }

    /// Remove a row record while leaving references to it in place.
    pub fn remove_row(&self, id: RowId) {
        self.inner.write().unwrap().rows.remove(&id);
    }

    /// Replace the level order of a parking. Returns `false` if it does not exist.
    pub fn reorder_levels(&self, parking_id: ParkingId, levels: Vec<LevelId>) -> bool {
        let mut inner = self.inner.write().unwrap();
        match inner.parkings.get_mut(&parking_id) {
            Some(parking) => {
                parking.levels = levels;
                true
            }
            None => false,
        }
    }

    fn run<T, F>(&self, op: F) -> StoreFuture<'_, T>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.clone();
        Box::pin(async move {
            if let Some(latency) = store.latency {
                tokio::time::sleep(latency).await;
            }
            if let Some(error) = store.failure.read().unwrap().clone() {
                return Err(error);
            }
            op(&store)
        })
    }
}

impl Default for InMemoryHierarchyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyStore for InMemoryHierarchyStore {
    fn find_space(&self, id: SpaceId) -> StoreFuture<'_, Option<ParkingSpace>> {
        self.run(move |store| Ok(store.space(id)))
    }

    fn find_row(&self, id: RowId) -> StoreFuture<'_, Option<Row>> {
        self.run(move |store| Ok(store.inner.read().unwrap().rows.get(&id).cloned()))
    }

    fn find_level(&self, id: LevelId) -> StoreFuture<'_, Option<Level>> {
        self.run(move |store| Ok(store.level(id)))
    }

    fn find_parking(&self, id: ParkingId) -> StoreFuture<'_, Option<Parking>> {
        self.run(move |store| Ok(store.inner.read().unwrap().parkings.get(&id).cloned()))
    }

    fn list_parkings(&self) -> StoreFuture<'_, Vec<Parking>> {
        self.run(|store| {
            let inner = store.inner.read().unwrap();
            Ok(inner
                .parking_order
                .iter()
                .filter_map(|id| inner.parkings.get(id).cloned())
                .collect())
        })
    }

    fn set_taken(&self, id: SpaceId, taken: bool) -> StoreFuture<'_, ()> {
        self.run(move |store| {
            let mut inner = store.inner.write().unwrap();
            let space = inner.spaces.get_mut(&id).ok_or(StoreError::SpaceNotFound(id))?;
            space.taken = taken;
            Ok(())
        })
    }

    fn initialize(&self) -> StoreFuture<'_, ()> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        self.run(|store| {
            let mut inner = store.inner.write().unwrap();
            if !inner.parking_order.is_empty() {
                return Ok(());
            }
            let flat = store
                .seed
                .flatten()
                .map_err(|e| StoreError::Seed(e.to_string()))?;
            inner.apply(flat);
            Ok(())
        })
    }
}
