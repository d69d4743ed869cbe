//! Identifiers and stored entities for the car park hierarchy.
//!
//! Entities never point at their parents. Each child records its parent's id
//! (`None` when the link is missing) and each parent records the ordered ids
//! of its children. Ancestors are resolved through store lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[doc = concat!("Create a `", stringify!($name), "` from its raw value")]
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw value
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a parking
    ParkingId
);
entity_id!(
    /// Unique identifier for a level
    LevelId
);
entity_id!(
    /// Unique identifier for a row
    RowId
);
entity_id!(
    /// Unique identifier for a parking space
    SpaceId
);

/// Full path of a parking space as supplied by a caller.
///
/// Booking and release requests address a space by all four ids. The
/// space itself is looked up by `place_id` alone; the other three ids must
/// match the space's recorded ancestry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceAddress {
    /// Claimed parking
    pub parking_id: ParkingId,
    /// Claimed level
    pub level_id: LevelId,
    /// Claimed row
    pub row_id: RowId,
    /// The space being addressed
    pub place_id: SpaceId,
}

impl PlaceAddress {
    /// Creates a new `PlaceAddress`
    #[must_use]
    pub const fn new(
        parking_id: ParkingId,
        level_id: LevelId,
        row_id: RowId,
        place_id: SpaceId,
    ) -> Self {
        Self {
            parking_id,
            level_id,
            row_id,
            place_id,
        }
    }
}

impl fmt::Display for PlaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ID={}, ROWID={}, LEVELID={}, PARKINGID={}]",
            self.place_id, self.row_id, self.level_id, self.parking_id
        )
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A car park facility
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parking {
    /// Parking ID
    pub id: ParkingId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Levels in store order
    pub levels: Vec<LevelId>,
}

impl Parking {
    /// Creates a parking with no levels
    #[must_use]
    pub fn new(id: ParkingId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            levels: Vec::new(),
        }
    }

    /// Zero-based position of `level_id` in this parking's level order.
    ///
    /// Computed by a linear scan on every call, so reordering `levels`
    /// changes the result.
    #[must_use]
    pub fn ordinal_of(&self, level_id: LevelId) -> Option<usize> {
        self.levels.iter().position(|id| *id == level_id)
    }
}

/// A floor within a parking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level ID
    pub id: LevelId,
    /// Owning parking, `None` when the link is missing
    pub parking_id: Option<ParkingId>,
    /// Rows in store order
    pub rows: Vec<RowId>,
}

/// A lane within a level
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row ID
    pub id: RowId,
    /// Owning level, `None` when the link is missing
    pub level_id: Option<LevelId>,
    /// Spaces in store order
    pub spaces: Vec<SpaceId>,
}

/// A single bookable parking space
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpace {
    /// Space ID
    pub id: SpaceId,
    /// Owning row, `None` when the link is missing
    pub row_id: Option<RowId>,
    /// Number painted on the space
    pub place_number: u32,
    /// Reserved for drivers with disabilities
    pub for_disable: bool,
    /// Whether the space is currently booked
    pub taken: bool,
}
