//! # Car Park Core
//!
//! Domain types and collaborator traits for the car park reservation system.
//!
//! A car park is a four-level hierarchy: a **parking** holds ordered
//! **levels**, a level holds ordered **rows**, and a row holds individual
//! **parking spaces** that can be booked and released.
//!
//! ## Core Concepts
//!
//! - **Entities**: stored records with explicit parent ids (no back-pointers)
//! - **Views**: detached read models handed to a presentation layer
//! - **`HierarchyStore`**: the data-access collaborator (lookups by id, listing, seeding)
//! - **`ReservationService`**: the capability set exposed to callers, with a
//!   local (store-backed) and a remote (transport-backed) implementation
//!
//! ## Example
//!
//! ```ignore
//! use car_park_core::{PlaceAddress, ReservationService};
//!
//! async fn reserve<S: ReservationService>(service: &S) -> Result<(), car_park_core::ReservationError> {
//!     let address = PlaceAddress::new(1u64.into(), 10u64.into(), 100u64.into(), 1000u64.into());
//!     service.book(address).await?;
//!     Ok(())
//! }
//! ```

pub use serde::{Deserialize, Serialize};

/// Error taxonomy shared by every `ReservationService` implementation
pub mod error;

/// Seed dataset used to initialize an empty store
pub mod seed;

/// The capability set exposed to callers
pub mod service;

/// The data-access collaborator contract
pub mod store;

/// Identifiers and stored entities
pub mod types;

/// Detached read-model views
pub mod view;

pub use error::ReservationError;
pub use seed::{FlatHierarchy, SeedData, SeedError, SeedLevel, SeedParking, SeedRow, SeedSpace};
pub use service::{ReservationFuture, ReservationService};
pub use store::{HierarchyStore, StoreError, StoreFuture};
pub use types::{
    Level, LevelId, Parking, ParkingId, ParkingSpace, PlaceAddress, Row, RowId, SpaceId,
};
pub use view::{LevelView, ParkingView, RowView, SpaceView};
