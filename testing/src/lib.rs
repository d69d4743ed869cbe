//! # Car Park Testing
//!
//! Testing utilities and fixtures for the car park reservation system.
//!
//! This crate provides:
//! - [`InMemoryHierarchyStore`]: a map-backed `HierarchyStore` with fault and
//!   latency injection
//! - [`HierarchyBuilder`]: a fluent builder for small hierarchies
//! - [`demo_seed`]: a ready-made dataset with two parkings
//! - Property-based strategies for random hierarchies
//!
//! ## Example
//!
//! ```ignore
//! use car_park_testing::HierarchyBuilder;
//! use car_park_runtime::LocalReservationService;
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn booking_marks_space_taken() {
//!     let store = Arc::new(
//!         HierarchyBuilder::new()
//!             .parking(1, "Central")
//!             .level(10)
//!             .row(100)
//!             .space(1000, 1)
//!             .build_store()
//!             .unwrap(),
//!     );
//!     let service = LocalReservationService::new(Arc::clone(&store));
//!
//!     service.book(address).await.unwrap();
//!     assert!(store.space(1000.into()).unwrap().taken);
//! }
//! ```

/// Fixture builders and canned datasets
pub mod fixtures;

/// In-memory store implementation
pub mod mocks;

/// Property-based testing strategies
pub mod properties;

pub use fixtures::{HierarchyBuilder, demo_seed};
pub use mocks::InMemoryHierarchyStore;

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honours `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
