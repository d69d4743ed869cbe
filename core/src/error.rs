//! Error taxonomy for reservation operations.
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | `PlaceInvalid` | book, release | The id chain of a space does not resolve or match |
//! | `PlaceNotAvailable` | book | The space is already taken |
//! | `InvalidArgument` | find level | The level belongs to another parking |
//! | `InconsistentState` | find level | Stored links contradict each other |
//! | `Unsupported` | remote release | Operation not offered by this provider |
//! | `Transport` | remote book | The remote service could not be reached |
//! | `Store` | local provider | The hierarchy store failed |
//!
//! Client errors propagate to the caller undecorated and are never retried
//! internally.

use crate::store::StoreError;
use crate::types::{LevelId, ParkingId, PlaceAddress, SpaceId};
use thiserror::Error;

/// Errors returned by a [`ReservationService`](crate::service::ReservationService).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// The space does not exist, or its row, level or parking differ from the
    /// ones supplied.
    #[error("Parking space with {0} not found")]
    PlaceInvalid(PlaceAddress),

    /// The space exists and the chain is valid, but it is already booked.
    #[error("Place with ID={place_id} is not available (already booked)")]
    PlaceNotAvailable {
        /// The space that was requested
        place_id: SpaceId,
    },

    /// A level was requested under a parking it does not belong to.
    #[error("Parking level with ID={level_id} has invalid parking identifier {parking_id}")]
    InvalidArgument {
        /// The parking supplied by the caller
        parking_id: ParkingId,
        /// The level that was requested
        level_id: LevelId,
    },

    /// Stored relations contradict each other (e.g. a level missing from its
    /// own parent's level list).
    #[error("Inconsistent hierarchy: {0}")]
    InconsistentState(String),

    /// The provider does not implement this operation.
    #[error("Operation not supported: {operation}")]
    Unsupported {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// The remote service could not be reached for a write.
    #[error("Remote service error: {0}")]
    Transport(String),

    /// The hierarchy store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReservationError {
    /// Whether the error was caused by the caller's input.
    ///
    /// Client errors are final: retrying the same request fails the same way
    /// until the underlying state changes.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::PlaceInvalid(_) | Self::PlaceNotAvailable { .. } | Self::InvalidArgument { .. }
        )
    }
}
