//! [`ReservationService`] backed by the remote car park service.
//!
//! Reads degrade gracefully: a transport fault, a null response or an error
//! status is logged and surfaces as an empty list or a not-found result.
//! Writes are stricter. `book` reports transport faults as
//! [`ReservationError::Transport`], and `release` is not offered at all.

use crate::messages::{
    BookPlace, ErrorInfo, ErrorStatus, GetLevelDetails, GetParkingDetails, GetParkingList,
    RemoteErrorCode, RemoteLevel, RemoteParking, RemoteSpace,
};
use crate::transport::CarParkTransport;
use car_park_core::{
    LevelId, LevelView, ParkingId, ParkingView, PlaceAddress, ReservationError,
    ReservationFuture, ReservationService, RowView, SpaceView,
};

/// Forwards reservation operations to a [`CarParkTransport`].
#[derive(Clone, Debug)]
pub struct RemoteReservationService<T> {
    transport: T,
}

impl<T> RemoteReservationService<T>
where
    T: CarParkTransport,
{
    /// Create a service over `transport`.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    async fn list_parkings_remote(&self) -> Vec<ParkingView> {
        let response = match self.transport.get_parking_list(GetParkingList {}).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                tracing::error!("Remote service error: parking list response is null");
                return Vec::new();
            }
            Err(error) => {
                tracing::error!(error = %error, "Remote service error while listing parkings");
                return Vec::new();
            }
        };

        if response.error.is_error() {
            tracing::error!(message = %response.error.message, "Remote service rejected parking list");
            return Vec::new();
        }

        response.parking_list.iter().map(parking_summary).collect()
    }

    async fn find_parking_remote(&self, id: ParkingId) -> Option<ParkingView> {
        let request = GetParkingDetails { parking_id: id };
        let response = match self.transport.get_parking_details(request).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                tracing::debug!(parking_id = %id, "Parking does not exist");
                return None;
            }
            Err(error) => {
                tracing::error!(parking_id = %id, error = %error, "Remote service error while finding parking");
                return None;
            }
        };

        if response.error.is_error() {
            tracing::debug!(parking_id = %id, message = %response.error.message, "Remote service rejected parking lookup");
            return None;
        }

        let parking = response.parking.filter(|p| p.id == id)?;
        let mut view = parking_summary(&parking);
        view.levels = parking
            .levels
            .iter()
            .enumerate()
            .map(|(ordinal, level)| LevelView::stub(level.id, ordinal))
            .collect();
        Some(view)
    }

    async fn find_level_remote(
        &self,
        parking_id: ParkingId,
        level_id: LevelId,
    ) -> Result<Option<LevelView>, ReservationError> {
        let request = GetLevelDetails {
            parking_id,
            level_id,
        };
        let response = match self.transport.get_level_details(request).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                tracing::debug!(level_id = %level_id, "Parking level does not exist");
                return Ok(None);
            }
            Err(error) => {
                tracing::error!(level_id = %level_id, error = %error, "Remote service error while finding level");
                return Ok(None);
            }
        };

        if response.error.is_error() {
            tracing::debug!(level_id = %level_id, message = %response.error.message, "Remote service rejected level lookup");
            return Ok(None);
        }

        let parking = match response.parking {
            Some(parking) if parking.id == parking_id => parking,
            _ => {
                return Err(ReservationError::InvalidArgument {
                    parking_id,
                    level_id,
                });
            }
        };

        let Some(level) = response.level else {
            tracing::debug!(level_id = %level_id, "Parking level missing from response");
            return Ok(None);
        };
        if level.id != level_id {
            tracing::warn!(
                requested = %level_id,
                returned = %level.id,
                "Remote service returned a different level than requested"
            );
            return Ok(None);
        }
        tracing::debug!(level_id = %level_id, "Parking level found");

        let Some(ordinal) = parking.levels.iter().position(|l| l.id == level_id) else {
            tracing::error!(
                level_id = %level_id,
                parking_id = %parking_id,
                "Remote parking does not list the requested level"
            );
            return Err(ReservationError::InconsistentState(format!(
                "level {level_id} is missing from the levels of parking {parking_id}"
            )));
        };

        Ok(Some(LevelView {
            id: level.id,
            ordinal,
            parking: Some(parking_summary(&parking)),
            rows: Some(rows_of(&level)),
        }))
    }

    async fn book_remote(&self, address: PlaceAddress) -> Result<(), ReservationError> {
        tracing::debug!(place = %address, "Parking place will be booked remotely");

        let response = self
            .transport
            .book_place(BookPlace::from(address))
            .await
            .map_err(|error| {
                tracing::error!(place = %address, error = %error, "Remote service error while booking");
                ReservationError::Transport(error.to_string())
            })?;

        let Some(response) = response else {
            tracing::debug!(place = %address, "Booking response is null");
            return Err(ReservationError::PlaceInvalid(address));
        };

        booking_outcome(address, &response.error)
    }
}

fn booking_outcome(address: PlaceAddress, info: &ErrorInfo) -> Result<(), ReservationError> {
    match (info.status, info.code) {
        (ErrorStatus::Success, _) => {
            tracing::debug!(place = %address, "Booked successfully");
            Ok(())
        }
        (ErrorStatus::Warning, _) => {
            tracing::warn!(place = %address, message = %info.message, "Booked with warning");
            Ok(())
        }
        (ErrorStatus::Error, Some(RemoteErrorCode::PlaceNotAvailable)) => {
            Err(ReservationError::PlaceNotAvailable {
                place_id: address.place_id,
            })
        }
        (ErrorStatus::Error, _) => {
            tracing::debug!(place = %address, message = %info.message, "Booking rejected");
            Err(ReservationError::PlaceInvalid(address))
        }
    }
}

fn parking_summary(parking: &RemoteParking) -> ParkingView {
    ParkingView {
        id: parking.id,
        name: parking.name.clone(),
        description: parking.description.clone(),
        levels: Vec::new(),
    }
}

fn rows_of(level: &RemoteLevel) -> Vec<RowView> {
    level
        .rows
        .iter()
        .map(|row| RowView {
            id: row.id,
            spaces: row.spaces.iter().map(space_view).collect(),
        })
        .collect()
}

const fn space_view(space: &RemoteSpace) -> SpaceView {
    SpaceView {
        id: space.id,
        place_number: space.number,
        for_disable: space.for_disable,
        taken: space.taken,
    }
}

impl<T> ReservationService for RemoteReservationService<T>
where
    T: CarParkTransport,
{
    fn list_parkings(&self) -> ReservationFuture<'_, Vec<ParkingView>> {
        Box::pin(async move { Ok(self.list_parkings_remote().await) })
    }

    fn find_parking(&self, id: ParkingId) -> ReservationFuture<'_, Option<ParkingView>> {
        Box::pin(async move { Ok(self.find_parking_remote(id).await) })
    }

    fn find_level(
        &self,
        parking_id: ParkingId,
        level_id: LevelId,
    ) -> ReservationFuture<'_, Option<LevelView>> {
        Box::pin(self.find_level_remote(parking_id, level_id))
    }

    fn book(&self, address: PlaceAddress) -> ReservationFuture<'_, ()> {
        Box::pin(self.book_remote(address))
    }

    fn release(&self, address: PlaceAddress) -> ReservationFuture<'_, ()> {
        tracing::warn!(place = %address, "Release is not supported by the remote service");
        Box::pin(async { Err(ReservationError::Unsupported { operation: "release" }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_park_core::SpaceId;

    fn address() -> PlaceAddress {
        PlaceAddress::new(1.into(), 10.into(), 100.into(), 1000.into())
    }

    #[test]
    fn not_available_code_maps_to_not_available() {
        let info = ErrorInfo::error(Some(RemoteErrorCode::PlaceNotAvailable), "taken");
        assert_eq!(
            booking_outcome(address(), &info),
            Err(ReservationError::PlaceNotAvailable {
                place_id: SpaceId::new(1000)
            })
        );
    }

    #[test]
    fn other_error_statuses_are_place_invalid() {
        for code in [None, Some(RemoteErrorCode::PlaceInvalid), Some(RemoteErrorCode::InvalidArgument)] {
            let info = ErrorInfo::error(code, "nope");
            assert_eq!(
                booking_outcome(address(), &info),
                Err(ReservationError::PlaceInvalid(address()))
            );
        }
    }

    #[test]
    fn warning_still_books() {
        let info = ErrorInfo {
            status: ErrorStatus::Warning,
            code: None,
            message: "last free space".into(),
        };
        assert_eq!(booking_outcome(address(), &info), Ok(()));
    }
}
