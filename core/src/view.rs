//! Read-model views handed to the presentation layer.
//!
//! Views are detached copies built per request. Derived fields such as a
//! level's ordinal are computed while building the view and never stored.

use crate::types::{LevelId, Parking, ParkingId, ParkingSpace, RowId, SpaceId};
use serde::{Deserialize, Serialize};

/// Projection of a parking.
///
/// `levels` is empty in listings and in the parent summary nested inside a
/// [`LevelView`]; it carries level stubs when the parking is looked up by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingView {
    /// Parking ID
    pub id: ParkingId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Level stubs in store order
    #[serde(default)]
    pub levels: Vec<LevelView>,
}

impl ParkingView {
    /// Lightweight projection (id, name, description) with no levels
    #[must_use]
    pub fn summary(parking: &Parking) -> Self {
        Self {
            id: parking.id,
            name: parking.name.clone(),
            description: parking.description.clone(),
            levels: Vec::new(),
        }
    }
}

/// Projection of a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelView {
    /// Level ID
    pub id: LevelId,
    /// Zero-based position within the parent parking
    pub ordinal: usize,
    /// Parent parking summary (unset on stubs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<ParkingView>,
    /// Rows with their spaces (unset on stubs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<RowView>>,
}

impl LevelView {
    /// Shallow stub carrying only id and ordinal
    #[must_use]
    pub const fn stub(id: LevelId, ordinal: usize) -> Self {
        Self {
            id,
            ordinal,
            parking: None,
            rows: None,
        }
    }
}

/// Projection of a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    /// Row ID
    pub id: RowId,
    /// Spaces in store order
    pub spaces: Vec<SpaceView>,
}

/// Projection of a parking space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceView {
    /// Space ID
    pub id: SpaceId,
    /// Number painted on the space
    pub place_number: u32,
    /// Reserved for drivers with disabilities
    pub for_disable: bool,
    /// Whether the space is currently booked
    pub taken: bool,
}

impl From<&ParkingSpace> for SpaceView {
    fn from(space: &ParkingSpace) -> Self {
        Self {
            id: space.id,
            place_number: space.place_number,
            for_disable: space.for_disable,
            taken: space.taken,
        }
    }
}
