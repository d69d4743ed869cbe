//! # Remote Car Park Client
//!
//! [`ReservationService`](car_park_core::ReservationService) implementation
//! that forwards to a remote car park service over JSON/HTTP.
//!
//! ## Example
//!
//! ```no_run
//! use car_park_core::ReservationService;
//! use car_park_remote::{HttpTransport, RemoteReservationService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads CAR_PARK_REMOTE_URL and CAR_PARK_REMOTE_TIMEOUT_MS
//!     let service = RemoteReservationService::new(HttpTransport::from_env()?);
//!
//!     for parking in service.list_parkings().await? {
//!         println!("{} {}", parking.id, parking.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior
//!
//! - Reads never fail on transport faults; they log and return empty results
//! - `book` maps remote error codes onto the reservation error taxonomy
//! - `release` is reported as unsupported

/// Remote endpoint configuration
pub mod config;

/// Transport failures
pub mod error;

/// Request and response messages on the wire
pub mod messages;

/// `ReservationService` backed by a remote transport
pub mod service;

/// Call/response transport and its HTTP implementation
pub mod transport;

// Re-export main types for convenience
pub use config::RemoteConfig;
pub use error::TransportError;
pub use messages::{
    BookPlace, BookPlaceResponse, ErrorInfo, ErrorStatus, GetLevelDetails,
    GetLevelDetailsResponse, GetParkingDetails, GetParkingDetailsResponse, GetParkingList,
    GetParkingListResponse, RemoteErrorCode, RemoteLevel, RemoteParking, RemoteRow, RemoteSpace,
};
pub use service::RemoteReservationService;
pub use transport::{CarParkTransport, HttpTransport, TransportFuture};
