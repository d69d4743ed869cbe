//! View builder: projects stored entities into read-model views.

use crate::metrics::ViewMetrics;
use car_park_core::{
    HierarchyStore, LevelId, LevelView, ParkingId, ParkingView, ReservationError, RowView,
    SpaceView,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

/// Builds parking and level views from flat store lookups.
///
/// Ordinals are recomputed from the parent's current level order on every
/// read. When the first listing finds the store empty, the store is seeded
/// once; concurrent first callers wait for that single initialization.
pub struct ViewBuilder<S: ?Sized> {
    store: Arc<S>,
    seeded: OnceCell<()>,
}

impl<S> ViewBuilder<S>
where
    S: HierarchyStore + ?Sized,
{
    /// Create a view builder over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            seeded: OnceCell::new(),
        }
    }

    /// Whether this builder has already triggered store initialization.
    #[must_use]
    pub fn has_seeded(&self) -> bool {
        self.seeded.initialized()
    }

    /// All parkings as `(id, name, description)` views in store order.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::Store`] if listing or seeding fails.
    pub async fn list_parkings(&self) -> Result<Vec<ParkingView>, ReservationError> {
        let mut parkings = self.store.list_parkings().await?;

        if parkings.is_empty() && !self.seeded.initialized() {
            self.seeded
                .get_or_try_init(|| async {
                    tracing::debug!("Parking list is empty, initializing store from seed data");
                    self.store.initialize().await?;
                    ViewMetrics::record_seed();
                    tracing::debug!("Parking list initialized");
                    Ok::<(), ReservationError>(())
                })
                .await?;
            parkings = self.store.list_parkings().await?;
        }

        let views: Vec<ParkingView> = parkings.iter().map(ParkingView::summary).collect();
        tracing::debug!(count = views.len(), "Parking list built");
        Ok(views)
    }

    /// A parking with its levels as `(id, ordinal)` stubs.
    ///
    /// # Errors
    ///
    /// Returns [`ReservationError::Store`] if the lookup fails.
    pub async fn find_parking(&self, id: ParkingId) -> Result<Option<ParkingView>, ReservationError> {
        let Some(parking) = self.store.find_parking(id).await? else {
            tracing::debug!(parking_id = %id, "Parking NOT found");
            return Ok(None);
        };
        tracing::debug!(parking_id = %id, "Parking found");

        let mut view = ParkingView::summary(&parking);
        view.levels = parking
            .levels
            .iter()
            .enumerate()
            .map(|(ordinal, level_id)| LevelView::stub(*level_id, ordinal))
            .collect();
        Ok(Some(view))
    }

    /// A level with its parent summary, ordinal, rows and spaces.
    ///
    /// # Errors
    ///
    /// - [`ReservationError::InvalidArgument`] if the level has no parent or
    ///   belongs to a parking other than `parking_id`
    /// - [`ReservationError::InconsistentState`] if the parent does not list
    ///   the level, or a row or space listed by the level is missing
    /// - [`ReservationError::Store`] if a lookup fails
    pub async fn find_level(
        &self,
        parking_id: ParkingId,
        level_id: LevelId,
    ) -> Result<Option<LevelView>, ReservationError> {
        let started = Instant::now();

        let Some(level) = self.store.find_level(level_id).await? else {
            tracing::debug!(level_id = %level_id, "Parking level NOT found");
            return Ok(None);
        };
        tracing::debug!(level_id = %level_id, "Parking level found");

        let invalid_parent = ReservationError::InvalidArgument {
            parking_id,
            level_id,
        };
        if level.parking_id != Some(parking_id) {
            return Err(invalid_parent);
        }
        let Some(parking) = self.store.find_parking(parking_id).await? else {
            return Err(invalid_parent);
        };

        let Some(ordinal) = parking.ordinal_of(level.id) else {
            tracing::error!(
                level_id = %level_id,
                parking_id = %parking_id,
                "Level references a parking that does not list it"
            );
            return Err(ReservationError::InconsistentState(format!(
                "level {level_id} is missing from the levels of parking {parking_id}"
            )));
        };

        let mut rows = Vec::with_capacity(level.rows.len());
        for row_id in &level.rows {
            let row = self.store.find_row(*row_id).await?.ok_or_else(|| {
                dangling("row", row_id.get(), "level", level_id.get())
            })?;

            let mut spaces = Vec::with_capacity(row.spaces.len());
            for space_id in &row.spaces {
                let space = self.store.find_space(*space_id).await?.ok_or_else(|| {
                    dangling("space", space_id.get(), "row", row_id.get())
                })?;
                spaces.push(SpaceView::from(&space));
            }
            rows.push(RowView { id: row.id, spaces });
        }

        ViewMetrics::record_level_view(started.elapsed());
        Ok(Some(LevelView {
            id: level.id,
            ordinal,
            parking: Some(ParkingView::summary(&parking)),
            rows: Some(rows),
        }))
    }
}

fn dangling(child: &str, child_id: u64, parent: &str, parent_id: u64) -> ReservationError {
    tracing::error!(child, child_id, parent, parent_id, "Dangling child reference");
    ReservationError::InconsistentState(format!(
        "{parent} {parent_id} lists missing {child} {child_id}"
    ))
}
