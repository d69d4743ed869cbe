//! Seed dataset for populating an empty store.
//!
//! The dataset is a nested document (parking → levels → rows → spaces),
//! usually loaded from JSON. [`SeedData::flatten`] turns it into stored
//! entities, deriving every parent id from the nesting.

use crate::types::{
    Level, LevelId, Parking, ParkingId, ParkingSpace, Row, RowId, SpaceId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading or flattening a seed dataset.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The seed document is not valid JSON for this schema.
    #[error("Failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same id appears twice at one level of the hierarchy.
    #[error("Duplicate {kind} id {id} in seed data")]
    DuplicateId {
        /// Entity kind ("parking", "level", "row" or "space")
        kind: &'static str,
        /// The repeated id
        id: u64,
    },
}

/// Root of a seed document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Parkings in insertion order
    #[serde(default)]
    pub parkings: Vec<SeedParking>,
}

/// A parking and its levels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedParking {
    /// Parking ID
    pub id: ParkingId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Levels in order
    #[serde(default)]
    pub levels: Vec<SeedLevel>,
}

/// A level and its rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedLevel {
    /// Level ID
    pub id: LevelId,
    /// Rows in order
    #[serde(default)]
    pub rows: Vec<SeedRow>,
}

/// A row and its spaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRow {
    /// Row ID
    pub id: RowId,
    /// Spaces in order
    #[serde(default)]
    pub spaces: Vec<SeedSpace>,
}

/// A single parking space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSpace {
    /// Space ID
    pub id: SpaceId,
    /// Number painted on the space
    pub place_number: u32,
    /// Reserved for drivers with disabilities
    #[serde(default)]
    pub for_disable: bool,
    /// Initial booking state
    #[serde(default)]
    pub taken: bool,
}

/// Stored entities produced by [`SeedData::flatten`], each in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatHierarchy {
    /// Parkings
    pub parkings: Vec<Parking>,
    /// Levels
    pub levels: Vec<Level>,
    /// Rows
    pub rows: Vec<Row>,
    /// Spaces
    pub spaces: Vec<ParkingSpace>,
}

impl SeedData {
    /// Parse a seed document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Parse`] if the JSON does not match the schema.
    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a seed document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Io`] if the file cannot be read, or
    /// [`SeedError::Parse`] if its contents do not match the schema.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of parking spaces in the document.
    #[must_use]
    pub fn space_count(&self) -> usize {
        self.parkings
            .iter()
            .flat_map(|p| &p.levels)
            .flat_map(|l| &l.rows)
            .map(|r| r.spaces.len())
            .sum()
    }

    /// Convert the nested document into stored entities with parent ids.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DuplicateId`] if an id repeats within its kind.
    pub fn flatten(&self) -> Result<FlatHierarchy, SeedError> {
        let mut flat = FlatHierarchy::default();
        let mut seen = SeenIds::default();

        for seed_parking in &self.parkings {
            seen.insert("parking", seed_parking.id.get())?;
            let mut parking = Parking::new(
                seed_parking.id,
                seed_parking.name.clone(),
                seed_parking.description.clone(),
            );

            for seed_level in &seed_parking.levels {
                seen.insert("level", seed_level.id.get())?;
                parking.levels.push(seed_level.id);
                let mut level = Level {
                    id: seed_level.id,
                    parking_id: Some(seed_parking.id),
                    rows: Vec::with_capacity(seed_level.rows.len()),
                };

                for seed_row in &seed_level.rows {
                    seen.insert("row", seed_row.id.get())?;
                    level.rows.push(seed_row.id);
                    let mut row = Row {
                        id: seed_row.id,
                        level_id: Some(seed_level.id),
                        spaces: Vec::with_capacity(seed_row.spaces.len()),
                    };

                    for seed_space in &seed_row.spaces {
                        seen.insert("space", seed_space.id.get())?;
                        row.spaces.push(seed_space.id);
                        flat.spaces.push(ParkingSpace {
                            id: seed_space.id,
                            row_id: Some(seed_row.id),
                            place_number: seed_space.place_number,
                            for_disable: seed_space.for_disable,
                            taken: seed_space.taken,
                        });
                    }
                    flat.rows.push(row);
                }
                flat.levels.push(level);
            }
            flat.parkings.push(parking);
        }

        Ok(flat)
    }
}

#[derive(Default)]
struct SeenIds {
    ids: HashSet<(&'static str, u64)>,
}

impl SeenIds {
    fn insert(&mut self, kind: &'static str, id: u64) -> Result<(), SeedError> {
        if self.ids.insert((kind, id)) {
            Ok(())
        } else {
            Err(SeedError::DuplicateId { kind, id })
        }
    }
}
