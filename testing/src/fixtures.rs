//! Fixture builders and canned datasets.

use crate::mocks::InMemoryHierarchyStore;
use car_park_core::{
    LevelId, ParkingId, RowId, SeedData, SeedError, SeedLevel, SeedParking, SeedRow, SeedSpace,
    SpaceId,
};

/// Fluent builder for seed datasets.
///
/// Each call nests under the most recently added ancestor: `level` goes into
/// the last parking, `row` into the last level, `space` into the last row.
/// Calls made before any suitable ancestor exists are ignored.
///
/// # Example
///
/// ```
/// use car_park_testing::HierarchyBuilder;
///
/// let seed = HierarchyBuilder::new()
///     .parking(1, "Central")
///     .level(10)
///     .row(100)
///     .space(1000, 1)
///     .disabled_space(1001, 2)
///     .build();
///
/// assert_eq!(seed.space_count(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct HierarchyBuilder {
    seed: SeedData,
}

impl HierarchyBuilder {
    /// Start an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parking.
    #[must_use]
    pub fn parking(mut self, id: u64, name: &str) -> Self {
        self.seed.parkings.push(SeedParking {
            id: ParkingId::new(id),
            name: name.to_string(),
            description: String::new(),
            levels: Vec::new(),
        });
        self
    }

    /// Set the description of the last parking.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        if let Some(parking) = self.seed.parkings.last_mut() {
            parking.description = description.to_string();
        }
        self
    }

    /// Append a level to the last parking.
    #[must_use]
    pub fn level(mut self, id: u64) -> Self {
        if let Some(parking) = self.seed.parkings.last_mut() {
            parking.levels.push(SeedLevel {
                id: LevelId::new(id),
                rows: Vec::new(),
            });
        }
        self
    }

    /// Append a row to the last level.
    #[must_use]
    pub fn row(mut self, id: u64) -> Self {
        if let Some(level) = self
            .seed
            .parkings
            .last_mut()
            .and_then(|p| p.levels.last_mut())
        {
            level.rows.push(SeedRow {
                id: RowId::new(id),
                spaces: Vec::new(),
            });
        }
        self
    }

    /// Append a free, unrestricted space to the last row.
    #[must_use]
    pub fn space(self, id: u64, place_number: u32) -> Self {
        self.push_space(id, place_number, false, false)
    }

    /// Append a free space reserved for drivers with disabilities.
    #[must_use]
    pub fn disabled_space(self, id: u64, place_number: u32) -> Self {
        self.push_space(id, place_number, true, false)
    }

    /// Append a space that starts out taken.
    #[must_use]
    pub fn taken_space(self, id: u64, place_number: u32) -> Self {
        self.push_space(id, place_number, false, true)
    }

    fn push_space(mut self, id: u64, place_number: u32, for_disable: bool, taken: bool) -> Self {
        if let Some(row) = self
            .seed
            .parkings
            .last_mut()
            .and_then(|p| p.levels.last_mut())
            .and_then(|l| l.rows.last_mut())
        {
            row.spaces.push(SeedSpace {
                id: SpaceId::new(id),
                place_number,
                for_disable,
                taken,
            });
        }
        self
    }

    /// The dataset built so far.
    #[must_use]
    pub fn build(self) -> SeedData {
        self.seed
    }

    /// A store already holding the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DuplicateId`] if the dataset repeats an id.
    pub fn build_store(self) -> Result<InMemoryHierarchyStore, SeedError> {
        InMemoryHierarchyStore::populated(self.seed)
    }

    /// An empty store that seeds itself from the dataset on initialization.
    #[must_use]
    pub fn build_lazy_store(self) -> InMemoryHierarchyStore {
        InMemoryHierarchyStore::with_seed(self.seed)
    }
}

/// Two parkings with a handful of levels, rows and spaces.
///
/// | Parking | Levels | Rows | Spaces |
/// |---------|--------|------|--------|
/// | 1 "Central" | 10, 11, 12 | 100, 101 on level 10; 110 on level 11 | 1000..=1003, 1010, 1011, 1100 |
/// | 2 "Airport" | 20 | 200 | 2000, 2001 (taken) |
#[must_use]
pub fn demo_seed() -> SeedData {
    HierarchyBuilder::new()
        .parking(1, "Central")
        .description("Underground car park below the main square")
        .level(10)
        .row(100)
        .space(1_000, 1)
        .space(1_001, 2)
        .disabled_space(1_002, 3)
        .space(1_003, 4)
        .row(101)
        .space(1_010, 5)
        .space(1_011, 6)
        .level(11)
        .row(110)
        .space(1_100, 1)
        .level(12)
        .parking(2, "Airport")
        .description("Short stay, terminal A")
        .level(20)
        .row(200)
        .space(2_000, 1)
        .taken_space(2_001, 2)
        .build()
}
