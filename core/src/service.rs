//! The reservation capability set.
//!
//! Two providers implement [`ReservationService`]:
//!
//! - `LocalReservationService` (in `car-park-runtime`): reads and writes the
//!   [`HierarchyStore`](crate::store::HierarchyStore) directly
//! - `RemoteReservationService` (in `car-park-remote`): forwards to a remote
//!   car park service and degrades to empty results on transport faults;
//!   `release` is reported as unsupported

use crate::error::ReservationError;
use crate::types::{LevelId, ParkingId, PlaceAddress};
use crate::view::{LevelView, ParkingView};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every [`ReservationService`] method.
pub type ReservationFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ReservationError>> + Send + 'a>>;

/// Operations exposed to the presentation layer.
pub trait ReservationService: Send + Sync {
    /// All parkings as lightweight views, in store order.
    ///
    /// # Errors
    ///
    /// Only collaborator failures are reported; an empty hierarchy yields an
    /// empty list.
    fn list_parkings(&self) -> ReservationFuture<'_, Vec<ParkingView>>;

    /// A parking with its level stubs, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Only collaborator failures are reported.
    fn find_parking(&self, id: ParkingId) -> ReservationFuture<'_, Option<ParkingView>>;

    /// A fully populated level view, or `None` if the level does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::InvalidArgument`] if the level belongs to a
    /// different parking than `parking_id`.
    fn find_level(
        &self,
        parking_id: ParkingId,
        level_id: LevelId,
    ) -> ReservationFuture<'_, Option<LevelView>>;

    /// Mark a free space as taken.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::PlaceInvalid`] if the id chain does not
    /// match, or [`ReservationError::PlaceNotAvailable`] if the space is
    /// already taken.
    fn book(&self, address: PlaceAddress) -> ReservationFuture<'_, ()>;

    /// Mark a space as free. Releasing a free space succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::PlaceInvalid`] if the id chain does not
    /// match.
    fn release(&self, address: PlaceAddress) -> ReservationFuture<'_, ()>;
}
