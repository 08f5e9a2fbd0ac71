//! Occupancy index.
//!
//! Whole-block snapshots are cached under one key per block; callers get
//! the slot/row window they asked for.

use std::ops::RangeInclusive;

use super::cache::occupancy_key;
use super::{CacheKind, SlotAllocationService};
use crate::domain::{Block, OccupancySnapshot};
use crate::error::AllocationResult;
use crate::ports::{CacheStore, TimeSource, TopologyStore};

impl<S, C, T> SlotAllocationService<S, C, T>
where
    S: TopologyStore,
    C: CacheStore,
    T: TimeSource,
{
    /// Occupied cells of `block` intersecting the window, across all tiers,
    /// with the block generation read before the snapshot.
    pub(crate) async fn occupied(
        &self,
        block: &Block,
        slots: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
    ) -> AllocationResult<(OccupancySnapshot, u64)> {
        let generation = self.store.block_generation(block.id).await?;
        let snapshot = self.block_occupancy(block, generation).await?;
        Ok((snapshot.window(slots, rows), generation))
    }

    async fn block_occupancy(
        &self,
        block: &Block,
        generation: u64,
    ) -> AllocationResult<OccupancySnapshot> {
        let key = occupancy_key(block.id);
        if let Some(snapshot) = self
            .cache_get::<OccupancySnapshot>(CacheKind::Occupancy, &key)
            .await
        {
            return Ok(snapshot);
        }

        let placed = self
            .store
            .placed_in_region(block.id, 1..=block.bounds.max_slot, 1..=block.bounds.max_row)
            .await?;
        let snapshot = OccupancySnapshot::from_containers(block.id, &placed);
        self.cache_put_guarded(CacheKind::Occupancy, &key, &snapshot, &[(block.id, generation)])
            .await;
        Ok(snapshot)
    }
}
