//! Concurrency tests
//!
//! The in-memory store is slowed down so that every request interleaves with
//! the others between its read and its write.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use car_park_core::{
    LevelId, ParkingId, PlaceAddress, ReservationError, ReservationService, RowId, SpaceId,
};
use car_park_runtime::LocalReservationService;
use car_park_testing::{InMemoryHierarchyStore, demo_seed, init_tracing};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

const CONTENDERS: usize = 16;

fn slow_service(
    store: InMemoryHierarchyStore,
) -> (
    Arc<InMemoryHierarchyStore>,
    Arc<LocalReservationService<InMemoryHierarchyStore>>,
) {
    init_tracing();
    let store = Arc::new(store.with_latency(Duration::from_millis(2)));
    let service = Arc::new(LocalReservationService::new(Arc::clone(&store)));
    (store, service)
}

fn address(place: u64) -> PlaceAddress {
    PlaceAddress::new(
        ParkingId::new(1),
        LevelId::new(10),
        RowId::new(100),
        SpaceId::new(place),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_bookings_of_one_space_have_a_single_winner() {
    let (store, service) = slow_service(InMemoryHierarchyStore::populated(demo_seed()).unwrap());

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.book(address(1000)).await })
        })
        .collect();

    let results: Vec<Result<(), ReservationError>> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("booking task panicked"))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results
        .iter()
        .filter(|r| {
            matches!(
                r,
                Err(ReservationError::PlaceNotAvailable { place_id }) if *place_id == SpaceId::new(1000)
            )
        })
        .count();

    assert_eq!(winners, 1);
    assert_eq!(losers, CONTENDERS - 1);
    assert!(store.space(SpaceId::new(1000)).unwrap().taken);
    assert!(service.booking().locks().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn bookings_of_different_spaces_do_not_block_each_other() {
    let (store, service) = slow_service(InMemoryHierarchyStore::populated(demo_seed()).unwrap());
    let places = [1000, 1001, 1002, 1003];

    let handles: Vec<_> = places
        .iter()
        .map(|place| {
            let service = Arc::clone(&service);
            let place = *place;
            tokio::spawn(async move { service.book(address(place)).await })
        })
        .collect();

    for joined in join_all(handles).await {
        joined.unwrap().unwrap();
    }
    for place in places {
        assert!(store.space(SpaceId::new(place)).unwrap().taken);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_listings_seed_once() {
    let (store, service) = slow_service(InMemoryHierarchyStore::with_seed(demo_seed()));

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.list_parkings().await })
        })
        .collect();

    for joined in join_all(handles).await {
        assert_eq!(joined.unwrap().unwrap().len(), 2);
    }
    assert_eq!(store.initialize_calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn interleaved_book_and_release_leave_a_consistent_flag() {
    let (store, service) = slow_service(InMemoryHierarchyStore::populated(demo_seed()).unwrap());

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                if i % 2 == 0 {
                    service.book(address(1001)).await.map(|()| true)
                } else {
                    service.release(address(1001)).await.map(|()| false)
                }
            })
        })
        .collect();

    for joined in join_all(handles).await {
        match joined.unwrap() {
            Ok(_) | Err(ReservationError::PlaceNotAvailable { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let taken = store.space(SpaceId::new(1001)).unwrap().taken;
    let level = service
        .find_level(ParkingId::new(1), LevelId::new(10))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(level.rows.unwrap()[0].spaces[1].taken, taken);
}
