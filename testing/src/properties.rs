//! Property-based testing strategies.
//!
//! [`arb_seed`] generates well-formed hierarchies with unique ids, so
//! properties can quantify over "every valid chain".

use car_park_core::{
    LevelId, ParkingId, PlaceAddress, RowId, SeedData, SeedLevel, SeedParking, SeedRow,
    SeedSpace, SpaceId,
};
use proptest::collection::vec;
use proptest::prelude::*;

/// `parking -> level -> row -> [taken]`
type Shape = Vec<Vec<Vec<Vec<bool>>>>;

fn arb_shape() -> impl Strategy<Value = Shape> {
    vec(vec(vec(vec(any::<bool>(), 1..4), 1..3), 1..4), 1..3)
}

/// Random, well-formed seed datasets.
///
/// Ids are assigned sequentially per kind starting at 1, so every generated
/// dataset flattens without duplicate-id errors.
pub fn arb_seed() -> impl Strategy<Value = SeedData> {
    arb_shape().prop_map(|shape| {
        let (mut level_id, mut row_id, mut space_id) = (0_u64, 0_u64, 0_u64);
        let mut seed = SeedData::default();

        for (parking_index, levels) in shape.into_iter().enumerate() {
            let mut parking = SeedParking {
                id: ParkingId::new(parking_index as u64 + 1),
                name: format!("Parking {}", parking_index + 1),
                description: String::new(),
                levels: Vec::new(),
            };
            for rows in levels {
                level_id += 1;
                let mut level = SeedLevel {
                    id: LevelId::new(level_id),
                    rows: Vec::new(),
                };
                for spaces in rows {
                    row_id += 1;
                    let mut row = SeedRow {
                        id: RowId::new(row_id),
                        spaces: Vec::new(),
                    };
                    for (number, taken) in spaces.into_iter().enumerate() {
                        space_id += 1;
                        row.spaces.push(SeedSpace {
                            id: SpaceId::new(space_id),
                            place_number: u32::try_from(number + 1).unwrap_or(u32::MAX),
                            for_disable: false,
                            taken,
                        });
                    }
                    level.rows.push(row);
                }
                parking.levels.push(level);
            }
            seed.parkings.push(parking);
        }
        seed
    })
}

/// Every valid address in `seed`, paired with the space's initial `taken` flag.
#[must_use]
pub fn addresses(seed: &SeedData) -> Vec<(PlaceAddress, bool)> {
    let mut out = Vec::new();
    for parking in &seed.parkings {
        for level in &parking.levels {
            for row in &level.rows {
                for space in &row.spaces {
                    out.push((
                        PlaceAddress::new(parking.id, level.id, row.id, space.id),
                        space.taken,
                    ));
                }
            }
        }
    }
    out
}
