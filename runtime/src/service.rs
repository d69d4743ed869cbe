//! Store-backed implementation of [`ReservationService`].

use crate::booking::BookingEngine;
use crate::views::ViewBuilder;
use car_park_core::{
    HierarchyStore, LevelId, LevelView, ParkingId, ParkingView, PlaceAddress, ReservationFuture,
    ReservationService,
};
use std::sync::Arc;

/// Reservation service reading and writing a local [`HierarchyStore`].
///
/// # Example
///
/// ```ignore
/// use car_park_runtime::LocalReservationService;
/// use car_park_testing::InMemoryHierarchyStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(InMemoryHierarchyStore::with_seed(seed));
/// let service = LocalReservationService::new(store);
///
/// let parkings = service.list_parkings().await?; // seeds on first call
/// service.book(address).await?;
/// ```
pub struct LocalReservationService<S: ?Sized> {
    booking: BookingEngine<S>,
    views: ViewBuilder<S>,
}

impl<S> LocalReservationService<S>
where
    S: HierarchyStore + ?Sized,
{
    /// Create a service over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            booking: BookingEngine::new(Arc::clone(&store)),
            views: ViewBuilder::new(store),
        }
    }

    /// The booking engine.
    #[must_use]
    pub const fn booking(&self) -> &BookingEngine<S> {
        &self.booking
    }

    /// The view builder.
    #[must_use]
    pub const fn views(&self) -> &ViewBuilder<S> {
        &self.views
    }
}

impl<S> ReservationService for LocalReservationService<S>
where
    S: HierarchyStore + ?Sized,
{
    fn list_parkings(&self) -> ReservationFuture<'_, Vec<ParkingView>> {
        Box::pin(self.views.list_parkings())
    }

    fn find_parking(&self, id: ParkingId) -> ReservationFuture<'_, Option<ParkingView>> {
        Box::pin(self.views.find_parking(id))
    }

    fn find_level(
        &self,
        parking_id: ParkingId,
        level_id: LevelId,
    ) -> ReservationFuture<'_, Option<LevelView>> {
        Box::pin(self.views.find_level(parking_id, level_id))
    }

    fn book(&self, address: PlaceAddress) -> ReservationFuture<'_, ()> {
        Box::pin(self.booking.book(address))
    }

    fn release(&self, address: PlaceAddress) -> ReservationFuture<'_, ()> {
        Box::pin(self.booking.release(address))
    }
}
