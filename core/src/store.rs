//! Hierarchy store trait: the data-access collaborator.
//!
//! The store owns every [`Parking`], [`Level`], [`Row`] and [`ParkingSpace`].
//! The reservation core only borrows copies of them for the duration of a
//! single operation and writes back exactly one field: a space's `taken`
//! flag.
//!
//! # Implementations
//!
//! - `InMemoryHierarchyStore` (in `car-park-testing`): map-backed, seeded
//!   from a [`SeedData`](crate::seed::SeedData) document
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of using `async fn` so the
//! store can be shared as `Arc<dyn HierarchyStore>`.

use crate::types::{Level, LevelId, Parking, ParkingId, ParkingSpace, Row, RowId, SpaceId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by every [`HierarchyStore`] method.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors raised by a store implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage could not be reached or queried.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The seed dataset could not be loaded or applied.
    #[error("Seeding failed: {0}")]
    Seed(String),

    /// A write targeted a space that does not exist.
    #[error("Parking space not found: {0}")]
    SpaceNotFound(SpaceId),
}

/// Point lookups, listing and seeding over the car park hierarchy.
///
/// Lookups return `Ok(None)` for unknown ids; `Err` is reserved for the store
/// itself failing.
pub trait HierarchyStore: Send + Sync {
    /// Look up a parking space by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backing storage fails.
    fn find_space(&self, id: SpaceId) -> StoreFuture<'_, Option<ParkingSpace>>;

    /// Look up a row by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backing storage fails.
    fn find_row(&self, id: RowId) -> StoreFuture<'_, Option<Row>>;

    /// Look up a level by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backing storage fails.
    fn find_level(&self, id: LevelId) -> StoreFuture<'_, Option<Level>>;

    /// Look up a parking by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backing storage fails.
    fn find_parking(&self, id: ParkingId) -> StoreFuture<'_, Option<Parking>>;

    /// List every parking in store (insertion) order. May be empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backing storage fails.
    fn list_parkings(&self) -> StoreFuture<'_, Vec<Parking>>;

    /// Overwrite the `taken` flag of a space.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SpaceNotFound`] if the space does not exist, or
    /// [`StoreError::Storage`] if the backing storage fails.
    fn set_taken(&self, id: SpaceId, taken: bool) -> StoreFuture<'_, ()>;

    /// Populate the store from its seed dataset.
    ///
    /// Must be idempotent: calling it on an already populated store leaves the
    /// contents unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Seed`] if the dataset cannot be applied.
    fn initialize(&self) -> StoreFuture<'_, ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_not_found_display() {
        let error = StoreError::SpaceNotFound(SpaceId::new(9));
        assert_eq!(error.to_string(), "Parking space not found: 9");
    }
}
