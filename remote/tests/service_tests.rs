//! `RemoteReservationService` against a scripted transport.

#![allow(clippy::unwrap_used)] // Test code

use car_park_core::{
    LevelId, ParkingId, PlaceAddress, ReservationError, ReservationService, RowId, SpaceId,
};
use car_park_remote::{
    BookPlace, BookPlaceResponse, CarParkTransport, ErrorInfo, ErrorStatus, GetLevelDetails,
    GetLevelDetailsResponse, GetParkingDetails, GetParkingDetailsResponse, GetParkingList,
    GetParkingListResponse, RemoteErrorCode, RemoteLevel, RemoteParking, RemoteReservationService,
    RemoteRow, RemoteSpace, TransportError, TransportFuture,
};
use std::sync::Mutex;

type Reply<T> = Result<Option<T>, TransportError>;

/// Answers every call with a canned reply and records book requests.
struct ScriptedTransport {
    parking_list: Reply<GetParkingListResponse>,
    parking_details: Reply<GetParkingDetailsResponse>,
    level_details: Reply<GetLevelDetailsResponse>,
    book: Reply<BookPlaceResponse>,
    booked: Mutex<Vec<BookPlace>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self {
            parking_list: Ok(None),
            parking_details: Ok(None),
            level_details: Ok(None),
            book: Ok(None),
            booked: Mutex::new(Vec::new()),
        }
    }
}

impl CarParkTransport for ScriptedTransport {
    fn get_parking_list(&self, _: GetParkingList) -> TransportFuture<'_, GetParkingListResponse> {
        let reply = self.parking_list.clone();
        Box::pin(async move { reply })
    }

    fn get_parking_details(
        &self,
        _: GetParkingDetails,
    ) -> TransportFuture<'_, GetParkingDetailsResponse> {
        let reply = self.parking_details.clone();
        Box::pin(async move { reply })
    }

    fn get_level_details(&self, _: GetLevelDetails) -> TransportFuture<'_, GetLevelDetailsResponse> {
        let reply = self.level_details.clone();
        Box::pin(async move { reply })
    }

    fn book_place(&self, request: BookPlace) -> TransportFuture<'_, BookPlaceResponse> {
        self.booked.lock().unwrap().push(request);
        let reply = self.book.clone();
        Box::pin(async move { reply })
    }
}

fn central() -> RemoteParking {
    RemoteParking {
        id: ParkingId::new(1),
        name: "Central".into(),
        description: "Main square".into(),
        levels: vec![level(10), level(11), level(12)],
    }
}

fn level(id: u64) -> RemoteLevel {
    RemoteLevel {
        id: LevelId::new(id),
        rows: vec![RemoteRow {
            id: RowId::new(id * 10),
            spaces: vec![RemoteSpace {
                id: SpaceId::new(id * 100),
                number: 1,
                for_disable: true,
                taken: false,
            }],
        }],
    }
}

fn level_response(parking: Option<RemoteParking>, level_id: u64) -> GetLevelDetailsResponse {
    GetLevelDetailsResponse {
        error: ErrorInfo::success(),
        parking,
        level: Some(level(level_id)),
    }
}

fn address() -> PlaceAddress {
    PlaceAddress::new(
        ParkingId::new(1),
        LevelId::new(10),
        RowId::new(100),
        SpaceId::new(1000),
    )
}

#[tokio::test]
async fn parking_list_maps_summaries() {
    let service = RemoteReservationService::new(ScriptedTransport {
        parking_list: Ok(Some(GetParkingListResponse {
            error: ErrorInfo::success(),
            parking_list: vec![central()],
        })),
        ..ScriptedTransport::default()
    });

    let parkings = service.list_parkings().await.unwrap();
    assert_eq!(parkings.len(), 1);
    assert_eq!(parkings[0].name, "Central");
    assert!(parkings[0].levels.is_empty());
}

#[tokio::test]
async fn parking_list_degrades_to_empty() {
    for reply in [
        Ok(None),
        Err(TransportError::Timeout),
        Ok(Some(GetParkingListResponse {
            error: ErrorInfo::error(None, "database offline"),
            parking_list: vec![central()],
        })),
    ] {
        let service = RemoteReservationService::new(ScriptedTransport {
            parking_list: reply,
            ..ScriptedTransport::default()
        });
        assert!(service.list_parkings().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn find_parking_returns_level_stubs() {
    let service = RemoteReservationService::new(ScriptedTransport {
        parking_details: Ok(Some(GetParkingDetailsResponse {
            error: ErrorInfo::success(),
            parking: Some(central()),
        })),
        ..ScriptedTransport::default()
    });

    let view = service.find_parking(ParkingId::new(1)).await.unwrap().unwrap();
    let stubs: Vec<(u64, usize)> = view.levels.iter().map(|l| (l.id.get(), l.ordinal)).collect();
    assert_eq!(stubs, vec![(10, 0), (11, 1), (12, 2)]);
}

#[tokio::test]
async fn find_parking_ignores_a_different_parking() {
    let service = RemoteReservationService::new(ScriptedTransport {
        parking_details: Ok(Some(GetParkingDetailsResponse {
            error: ErrorInfo::success(),
            parking: Some(central()),
        })),
        ..ScriptedTransport::default()
    });

    assert!(service.find_parking(ParkingId::new(2)).await.unwrap().is_none());
}

#[tokio::test]
async fn find_parking_error_status_is_not_found() {
    let service = RemoteReservationService::new(ScriptedTransport {
        parking_details: Ok(Some(GetParkingDetailsResponse {
            error: ErrorInfo::error(Some(RemoteErrorCode::PlaceInvalid), "unknown parking"),
            parking: Some(central()),
        })),
        ..ScriptedTransport::default()
    });

    assert!(service.find_parking(ParkingId::new(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn find_level_uses_requested_level_for_ordinal() {
    let service = RemoteReservationService::new(ScriptedTransport {
        level_details: Ok(Some(level_response(Some(central()), 11))),
        ..ScriptedTransport::default()
    });

    let view = service
        .find_level(ParkingId::new(1), LevelId::new(11))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(view.ordinal, 1);
    assert_eq!(view.parking.unwrap().id, ParkingId::new(1));
    let rows = view.rows.unwrap();
    assert_eq!(rows[0].spaces[0].id, SpaceId::new(1100));
    assert!(rows[0].spaces[0].for_disable);
}

#[tokio::test]
async fn find_level_under_wrong_parking_is_invalid_argument() {
    let service = RemoteReservationService::new(ScriptedTransport {
        level_details: Ok(Some(level_response(Some(central()), 11))),
        ..ScriptedTransport::default()
    });

    let error = service
        .find_level(ParkingId::new(2), LevelId::new(11))
        .await
        .unwrap_err();
    assert_eq!(
        error,
        ReservationError::InvalidArgument {
            parking_id: ParkingId::new(2),
            level_id: LevelId::new(11),
        }
    );
}

#[tokio::test]
async fn find_level_without_parent_is_invalid_argument() {
    let service = RemoteReservationService::new(ScriptedTransport {
        level_details: Ok(Some(level_response(None, 11))),
        ..ScriptedTransport::default()
    });

    let error = service
        .find_level(ParkingId::new(1), LevelId::new(11))
        .await
        .unwrap_err();
    assert!(matches!(error, ReservationError::InvalidArgument { .. }));
}

#[tokio::test]
async fn find_level_with_mismatched_level_is_not_found() {
    let service = RemoteReservationService::new(ScriptedTransport {
        level_details: Ok(Some(level_response(Some(central()), 12))),
        ..ScriptedTransport::default()
    });

    let view = service
        .find_level(ParkingId::new(1), LevelId::new(11))
        .await
        .unwrap();
    assert!(view.is_none());
}

#[tokio::test]
async fn find_level_error_status_is_not_found() {
    let service = RemoteReservationService::new(ScriptedTransport {
        level_details: Ok(Some(GetLevelDetailsResponse {
            error: ErrorInfo::error(None, "level lookup failed"),
            ..level_response(Some(central()), 11)
        })),
        ..ScriptedTransport::default()
    });

    let view = service
        .find_level(ParkingId::new(1), LevelId::new(11))
        .await
        .unwrap();
    assert!(view.is_none());
}

#[tokio::test]
async fn level_missing_from_remote_parking_is_inconsistent() {
    let mut parking = central();
    parking.levels.retain(|l| l.id != LevelId::new(11));
    let service = RemoteReservationService::new(ScriptedTransport {
        level_details: Ok(Some(level_response(Some(parking), 11))),
        ..ScriptedTransport::default()
    });

    let error = service
        .find_level(ParkingId::new(1), LevelId::new(11))
        .await
        .unwrap_err();

    assert!(matches!(error, ReservationError::InconsistentState(_)));
    assert!(!error.is_client_error());
}

#[tokio::test]
async fn find_level_degrades_on_transport_fault() {
    let service = RemoteReservationService::new(ScriptedTransport {
        level_details: Err(TransportError::RequestFailed("connection refused".into())),
        ..ScriptedTransport::default()
    });

    let view = service
        .find_level(ParkingId::new(1), LevelId::new(11))
        .await
        .unwrap();
    assert!(view.is_none());
}

#[tokio::test]
async fn book_forwards_the_full_address() {
    let service = RemoteReservationService::new(ScriptedTransport {
        book: Ok(Some(BookPlaceResponse {
            error: ErrorInfo::success(),
        })),
        ..ScriptedTransport::default()
    });

    service.book(address()).await.unwrap();

    let booked = service.transport().booked.lock().unwrap().clone();
    assert_eq!(booked, vec![BookPlace::from(address())]);
}

#[tokio::test]
async fn book_null_response_is_place_invalid() {
    let service = RemoteReservationService::new(ScriptedTransport::default());

    assert_eq!(
        service.book(address()).await,
        Err(ReservationError::PlaceInvalid(address()))
    );
}

#[tokio::test]
async fn book_error_codes_map_to_reservation_errors() {
    let service = RemoteReservationService::new(ScriptedTransport {
        book: Ok(Some(BookPlaceResponse {
            error: ErrorInfo::error(Some(RemoteErrorCode::PlaceNotAvailable), "taken"),
        })),
        ..ScriptedTransport::default()
    });

    assert_eq!(
        service.book(address()).await,
        Err(ReservationError::PlaceNotAvailable {
            place_id: SpaceId::new(1000)
        })
    );
}

#[tokio::test]
async fn book_warning_is_accepted() {
    let service = RemoteReservationService::new(ScriptedTransport {
        book: Ok(Some(BookPlaceResponse {
            error: ErrorInfo {
                status: ErrorStatus::Warning,
                code: None,
                message: "last free space".into(),
            },
        })),
        ..ScriptedTransport::default()
    });

    assert!(service.book(address()).await.is_ok());
}

#[test]
fn release_is_unsupported_and_never_reaches_the_transport() {
    let service = RemoteReservationService::new(ScriptedTransport::default());

    let mut release = tokio_test::task::spawn(service.release(address()));
    let error = tokio_test::assert_ready_err!(release.poll());

    assert_eq!(
        error,
        ReservationError::Unsupported {
            operation: "release"
        }
    );
    drop(release);
    assert!(service.transport().booked.lock().unwrap().is_empty());
}
