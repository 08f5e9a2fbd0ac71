//! In-memory topology store.
//!
//! Reference implementation of the [`TopologyStore`] contract. All state sits
//! behind one `RwLock`; commits take the write lock for the whole
//! check-then-write, and the `(block, cell)` index holds at most one
//! container number per cell.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use tracing::debug;

use crate::domain::{
    Block, BlockBounds, BlockId, Cell, Container, ContainerAttributes, PlanAssignment, PlanId,
    PriorityDirection, Timestamp, Yard, YardId, YardPlan,
};
use crate::error::StoreError;
use crate::ports::{PlacementCommit, TopologyStore};

#[derive(Debug, Default)]
struct Topology {
    yards: HashMap<YardId, Yard>,
    yard_names: HashMap<String, YardId>,
    blocks: HashMap<BlockId, Block>,
    plans: BTreeMap<PlanId, YardPlan>,
    containers: HashMap<String, Container>,
    /// Unique index over placed containers.
    occupied: HashMap<(BlockId, Cell), String>,
    /// Bumped by every committed placement or pickup in the block.
    generations: HashMap<BlockId, u64>,
    last_id: u64,
}

impl Topology {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn block(&self, block_id: BlockId) -> Result<&Block, StoreError> {
        self.blocks
            .get(&block_id)
            .ok_or_else(|| StoreError::InvalidTopology(format!("unknown block id {block_id}")))
    }

    fn bump_generation(&mut self, block_id: BlockId) {
        *self.generations.entry(block_id).or_default() += 1;
    }
}

/// Topology store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTopologyStore {
    state: RwLock<Topology>,
    /// When set, every call fails with `Unavailable`.
    outage: Mutex<Option<String>>,
}

impl InMemoryTopologyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the backing database going away (`Some`) or coming back (`None`).
    pub fn set_outage(&self, reason: Option<String>) {
        *self.outage.lock() = reason;
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match self.outage.lock().as_ref() {
            Some(reason) => Err(StoreError::Unavailable {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn insert_yard(&self, name: &str) -> Result<Yard, StoreError> {
        let mut state = self.state.write();
        if state.yard_names.contains_key(name) {
            return Err(StoreError::InvalidTopology(format!(
                "yard {name} already exists"
            )));
        }

        let yard = Yard {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.yard_names.insert(yard.name.clone(), yard.id);
        state.yards.insert(yard.id, yard.clone());
        Ok(yard)
    }

    pub fn insert_block(
        &self,
        yard_id: YardId,
        name: &str,
        bounds: BlockBounds,
    ) -> Result<Block, StoreError> {
        let mut state = self.state.write();
        if !state.yards.contains_key(&yard_id) {
            return Err(StoreError::InvalidTopology(format!(
                "unknown yard id {yard_id}"
            )));
        }
        if state
            .blocks
            .values()
            .any(|b| b.yard_id == yard_id && b.name == name)
        {
            return Err(StoreError::InvalidTopology(format!(
                "block {name} already exists in yard {yard_id}"
            )));
        }

        let block = Block {
            id: state.next_id(),
            yard_id,
            name: name.to_string(),
            bounds,
        };
        state.blocks.insert(block.id, block.clone());
        Ok(block)
    }

    /// Add a plan covering `slots` x `rows` of a block. The region must lie
    /// inside the block.
    pub fn insert_plan(
        &self,
        block_id: BlockId,
        attributes: ContainerAttributes,
        slots: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
        priority: PriorityDirection,
    ) -> Result<YardPlan, StoreError> {
        let mut state = self.state.write();
        let bounds = state.block(block_id)?.bounds;

        let valid = |range: &RangeInclusive<u32>, max: u32| {
            !range.is_empty() && *range.start() >= 1 && *range.end() <= max
        };
        if !valid(&slots, bounds.max_slot) || !valid(&rows, bounds.max_row) {
            return Err(StoreError::InvalidTopology(format!(
                "plan region slots {slots:?} rows {rows:?} outside block {block_id}"
            )));
        }

        let plan = YardPlan {
            id: state.next_id(),
            block_id,
            attributes,
            start_slot: *slots.start(),
            end_slot: *slots.end(),
            start_row: *rows.start(),
            end_row: *rows.end(),
            priority,
        };
        state.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    /// Number of cells currently held in the unique index.
    pub fn occupied_cell_count(&self) -> usize {
        self.state.read().occupied.len()
    }
}

#[async_trait]
impl TopologyStore for InMemoryTopologyStore {
    async fn find_yard(&self, name: &str) -> Result<Option<Yard>, StoreError> {
        self.check_available()?;
        let state = self.state.read();
        Ok(state
            .yard_names
            .get(name)
            .and_then(|id| state.yards.get(id))
            .cloned())
    }

    async fn find_block(&self, yard_id: YardId, name: &str) -> Result<Option<Block>, StoreError> {
        self.check_available()?;
        let state = self.state.read();
        Ok(state
            .blocks
            .values()
            .find(|b| b.yard_id == yard_id && b.name == name)
            .cloned())
    }

    async fn plans_for_yard(&self, yard_id: YardId) -> Result<Vec<PlanAssignment>, StoreError> {
        self.check_available()?;
        let state = self.state.read();
        let plans = state
            .plans
            .values()
            .filter_map(|plan| {
                let block = state.blocks.get(&plan.block_id)?;
                (block.yard_id == yard_id).then(|| PlanAssignment {
                    plan: plan.clone(),
                    block: block.clone(),
                })
            })
            .collect();
        Ok(plans)
    }

    async fn find_container(
        &self,
        container_number: &str,
    ) -> Result<Option<Container>, StoreError> {
        self.check_available()?;
        Ok(self.state.read().containers.get(container_number).cloned())
    }

    async fn placed_in_region(
        &self,
        block_id: BlockId,
        slots: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
    ) -> Result<Vec<Container>, StoreError> {
        self.check_available()?;
        let state = self.state.read();
        let mut found: Vec<Container> = state
            .containers
            .values()
            .filter(|c| c.is_placed && c.block_id == block_id && rows.contains(&c.anchor.row))
            .filter(|c| c.occupied_cells().any(|cell| slots.contains(&cell.slot)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.container_number.cmp(&b.container_number));
        Ok(found)
    }

    async fn commit_placement(&self, commit: PlacementCommit) -> Result<Container, StoreError> {
        self.check_available()?;
        let mut state = self.state.write();

        let bounds = state.block(commit.block_id)?.bounds;
        let footprint = commit.attributes.size.footprint();
        if !bounds.contains_footprint(commit.anchor, footprint) {
            return Err(StoreError::InvalidTopology(format!(
                "{} outside block {}",
                commit.anchor, commit.block_id
            )));
        }

        // Occupancy re-check under the same lock as the write
        for cell in footprint.cells(commit.anchor) {
            if let Some(holder) = state.occupied.get(&(commit.block_id, cell)) {
                return Err(StoreError::CellOccupied {
                    block_id: commit.block_id,
                    cell,
                    occupied_by: holder.clone(),
                });
            }
        }

        if let Some(existing) = state.containers.get(&commit.container_number) {
            if existing.is_placed {
                return Err(StoreError::ContainerAlreadyPlaced {
                    container_number: commit.container_number,
                    block_id: existing.block_id,
                });
            }
        }

        let container = Container {
            container_number: commit.container_number,
            block_id: commit.block_id,
            anchor: commit.anchor,
            attributes: commit.attributes,
            is_placed: true,
            placed_at: commit.placed_at,
            picked_up_at: None,
        };

        for cell in container.occupied_cells() {
            state
                .occupied
                .insert((container.block_id, cell), container.container_number.clone());
        }
        state
            .containers
            .insert(container.container_number.clone(), container.clone());
        state.bump_generation(container.block_id);

        debug!(
            container = %container.container_number,
            block_id = container.block_id,
            anchor = %container.anchor,
            "[yard] placement committed"
        );
        Ok(container)
    }

    async fn commit_pickup(
        &self,
        yard_id: YardId,
        container_number: &str,
        picked_up_at: Timestamp,
    ) -> Result<Container, StoreError> {
        self.check_available()?;
        let mut state = self.state.write();

        let not_found = || StoreError::ContainerNotFound {
            container_number: container_number.to_string(),
        };
        let existing = state.containers.get(container_number).ok_or_else(not_found)?;
        let in_yard = state
            .blocks
            .get(&existing.block_id)
            .is_some_and(|b| b.yard_id == yard_id);
        if !in_yard {
            return Err(not_found());
        }
        if !existing.is_placed {
            return Err(StoreError::NotPlaced {
                container_number: container_number.to_string(),
            });
        }

        let block_id = existing.block_id;
        let cells: Vec<Cell> = existing.occupied_cells().collect();
        for cell in cells {
            state.occupied.remove(&(block_id, cell));
        }

        let container = state
            .containers
            .get_mut(container_number)
            .ok_or_else(not_found)?;
        container.is_placed = false;
        container.picked_up_at = Some(picked_up_at);
        let container = container.clone();
        state.bump_generation(block_id);

        debug!(
            container = %container.container_number,
            block_id,
            "[yard] pickup committed"
        );
        Ok(container)
    }

    async fn block_generation(&self, block_id: BlockId) -> Result<u64, StoreError> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .generations
            .get(&block_id)
            .copied()
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
