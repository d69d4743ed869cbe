//! Request and response messages exchanged with the remote car park service.
//!
//! Every response carries an [`ErrorInfo`] next to its payload. Payload
//! fields are optional on the wire; a missing list decodes as empty.

use car_park_core::{LevelId, ParkingId, PlaceAddress, RowId, SpaceId};
use serde::{Deserialize, Serialize};

/// Outcome reported by the remote service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorStatus {
    /// Request fulfilled
    #[default]
    Success,
    /// Request fulfilled with a remark
    Warning,
    /// Request rejected
    Error,
}

/// Machine-readable reason attached to an error status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteErrorCode {
    /// The id chain of a space does not match
    PlaceInvalid,
    /// The space is already taken
    PlaceNotAvailable,
    /// A level was requested under the wrong parking
    InvalidArgument,
}

/// Status block carried by every response
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Outcome of the request
    pub status: ErrorStatus,
    /// Reason for an error status, if the service supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<RemoteErrorCode>,
    /// Human-readable detail
    #[serde(default)]
    pub message: String,
}

impl ErrorInfo {
    /// A plain success status
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// An error status with an optional code
    #[must_use]
    pub fn error(code: Option<RemoteErrorCode>, message: impl Into<String>) -> Self {
        Self {
            status: ErrorStatus::Error,
            code,
            message: message.into(),
        }
    }

    /// Whether the status is [`ErrorStatus::Error`]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ErrorStatus::Error
    }
}

/// Parking as sent by the remote service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteParking {
    /// Parking ID
    pub id: ParkingId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Levels in service order
    #[serde(default)]
    pub levels: Vec<RemoteLevel>,
}

/// Level as sent by the remote service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLevel {
    /// Level ID
    pub id: LevelId,
    /// Rows in service order
    #[serde(default)]
    pub rows: Vec<RemoteRow>,
}

/// Row as sent by the remote service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRow {
    /// Row ID
    pub id: RowId,
    /// Spaces in service order
    #[serde(default)]
    pub spaces: Vec<RemoteSpace>,
}

/// Space as sent by the remote service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSpace {
    /// Space ID
    pub id: SpaceId,
    /// Number painted on the space
    pub number: u32,
    /// Reserved for drivers with disabilities
    #[serde(default)]
    pub for_disable: bool,
    /// Currently booked
    #[serde(default)]
    pub taken: bool,
}

/// Request for every parking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParkingList {}

/// Response to [`GetParkingList`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParkingListResponse {
    /// Status block
    #[serde(default)]
    pub error: ErrorInfo,
    /// Parkings in service order
    #[serde(default)]
    pub parking_list: Vec<RemoteParking>,
}

/// Request for one parking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParkingDetails {
    /// Requested parking
    pub parking_id: ParkingId,
}

/// Response to [`GetParkingDetails`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParkingDetailsResponse {
    /// Status block
    #[serde(default)]
    pub error: ErrorInfo,
    /// The parking, if found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<RemoteParking>,
}

/// Request for one level of a parking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLevelDetails {
    /// Parking the caller expects the level to belong to
    pub parking_id: ParkingId,
    /// Requested level
    pub level_id: LevelId,
}

/// Response to [`GetLevelDetails`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLevelDetailsResponse {
    /// Status block
    #[serde(default)]
    pub error: ErrorInfo,
    /// Parent parking with its full level list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<RemoteParking>,
    /// The level with rows and spaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<RemoteLevel>,
}

/// Request to book one space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPlace {
    /// Parking of the space
    pub parking_id: ParkingId,
    /// Level of the space
    pub level_id: LevelId,
    /// Row of the space
    pub row_id: RowId,
    /// The space to book
    pub place_id: SpaceId,
}

impl From<PlaceAddress> for BookPlace {
    fn from(address: PlaceAddress) -> Self {
        Self {
            parking_id: address.parking_id,
            level_id: address.level_id,
            row_id: address.row_id,
            place_id: address.place_id,
        }
    }
}

/// Response to [`BookPlace`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPlaceResponse {
    /// Status block
    #[serde(default)]
    pub error: ErrorInfo,
}
