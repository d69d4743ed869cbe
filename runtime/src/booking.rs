//! Booking engine: chain validation and the `taken` toggle.
//!
//! A space is addressed by its full path (parking, level, row, place) but the
//! store is keyed by the leaf id alone. Every request therefore walks the
//! space's recorded ancestry and rejects the request as `PlaceInvalid` when a
//! link is missing or names a different ancestor than the caller supplied.

use crate::locks::SpaceLocks;
use crate::metrics::{BookingMetrics, Outcome};
use car_park_core::{HierarchyStore, ParkingSpace, PlaceAddress, ReservationError};
use std::sync::Arc;

/// Validates id chains and mutates a space's occupancy.
///
/// The engine is the only writer of `taken`. Book and release on one space
/// are serialized through a [`SpaceLocks`] table, so of N concurrent bookings
/// of a free space exactly one succeeds.
pub struct BookingEngine<S: ?Sized> {
    store: Arc<S>,
    locks: SpaceLocks,
}

impl<S> BookingEngine<S>
where
    S: HierarchyStore + ?Sized,
{
    /// Create an engine over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            locks: SpaceLocks::new(),
        }
    }

    /// The per-space lock table.
    #[must_use]
    pub const fn locks(&self) -> &SpaceLocks {
        &self.locks
    }

    /// Mark a free space as taken.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::PlaceInvalid`] if the chain does not resolve
    /// - [`ReservationError::PlaceNotAvailable`] if the space is already taken
    /// - [`ReservationError::Store`] if the store fails
    pub async fn book(&self, address: PlaceAddress) -> Result<(), ReservationError> {
        tracing::debug!(place = %address, "Parking place will be booked");

        let _guard = self.locks.acquire(address.place_id).await;
        let result = self.book_locked(address).await;
        BookingMetrics::record_booking(outcome_of(&result));
        result
    }

    async fn book_locked(&self, address: PlaceAddress) -> Result<(), ReservationError> {
        let space = self.resolve(address).await?;

        if space.taken {
            tracing::debug!(place = %address, "Parking place already taken");
            return Err(ReservationError::PlaceNotAvailable {
                place_id: address.place_id,
            });
        }

        self.store.set_taken(space.id, true).await?;
        tracing::debug!(place = %address, "Parking place marked as taken");
        Ok(())
    }

    /// Mark a space as free.
    ///
    /// Releasing a space that is already free succeeds and leaves it free.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::PlaceInvalid`] if the chain does not resolve
    /// - [`ReservationError::Store`] if the store fails
    pub async fn release(&self, address: PlaceAddress) -> Result<(), ReservationError> {
        tracing::debug!(place = %address, "Parking place will be released");

        let _guard = self.locks.acquire(address.place_id).await;
        let result = self.release_locked(address).await;
        BookingMetrics::record_release(outcome_of(&result));
        result
    }

    async fn release_locked(&self, address: PlaceAddress) -> Result<(), ReservationError> {
        let space = self.resolve(address).await?;
        self.store.set_taken(space.id, false).await?;
        tracing::debug!(place = %address, "Parking place marked as released");
        Ok(())
    }

    /// Resolve the space and confirm every recorded ancestor matches `address`.
    async fn resolve(&self, address: PlaceAddress) -> Result<ParkingSpace, ReservationError> {
        let invalid = || {
            tracing::debug!(place = %address, "Parking place chain does not match");
            ReservationError::PlaceInvalid(address)
        };

        let space = self
            .store
            .find_space(address.place_id)
            .await?
            .ok_or_else(invalid)?;
        if space.row_id != Some(address.row_id) {
            return Err(invalid());
        }

        let row = self
            .store
            .find_row(address.row_id)
            .await?
            .ok_or_else(invalid)?;
        if row.level_id != Some(address.level_id) {
            return Err(invalid());
        }

        let level = self
            .store
            .find_level(address.level_id)
            .await?
            .ok_or_else(invalid)?;
        if level.parking_id != Some(address.parking_id) {
            return Err(invalid());
        }

        if self.store.find_parking(address.parking_id).await?.is_none() {
            return Err(invalid());
        }

        tracing::debug!(place = %address, "Parking place found");
        Ok(space)
    }
}

const fn outcome_of(result: &Result<(), ReservationError>) -> Outcome {
    match result {
        Ok(()) => Outcome::Applied,
        Err(ReservationError::PlaceInvalid(_)) => Outcome::Invalid,
        Err(ReservationError::PlaceNotAvailable { .. }) => Outcome::Unavailable,
        Err(_) => Outcome::Failed,
    }
}
