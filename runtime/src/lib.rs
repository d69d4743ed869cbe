//! # Car Park Runtime
//!
//! Local, store-backed implementation of the reservation service.
//!
//! ## Core Components
//!
//! - **`BookingEngine`**: walks a space's ancestry, validates the caller's id
//!   chain and toggles the `taken` flag under a per-space lock
//! - **`ViewBuilder`**: projects parkings and levels into read-model views,
//!   computing level ordinals at read time and seeding an empty store once
//! - **`LocalReservationService`**: composes both behind
//!   [`ReservationService`](car_park_core::ReservationService)
//!
//! ## Example
//!
//! ```ignore
//! use car_park_core::{PlaceAddress, ReservationService};
//! use car_park_runtime::LocalReservationService;
//! use std::sync::Arc;
//!
//! let service = LocalReservationService::new(Arc::new(store));
//!
//! service.book(PlaceAddress::new(1.into(), 10.into(), 100.into(), 1000.into())).await?;
//! let level = service.find_level(1.into(), 10.into()).await?;
//! ```

/// Chain validation and occupancy changes
pub mod booking;

/// Per-space mutual exclusion
pub mod locks;

/// Prometheus metrics for observability
pub mod metrics;

/// `ReservationService` over a local store
pub mod service;

/// Read-model projection
pub mod views;

pub use booking::BookingEngine;
pub use locks::{SpaceGuard, SpaceLocks};
pub use service::LocalReservationService;
pub use views::ViewBuilder;
