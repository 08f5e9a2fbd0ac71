//! Outbound Ports (Driven Ports)
//!
//! Dependencies the allocation service needs from its host.
//!
//! Production hosts back [`TopologyStore`] with a relational database where
//! `commit_placement` is a transaction guarded by a unique constraint on
//! `(block, slot, row, tier)` among placed containers. The in-memory adapter
//! in `crate::adapters` gives the same guarantee with a single write lock.

use async_trait::async_trait;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::domain::{
    Block, BlockId, Cell, Container, ContainerAttributes, PlanAssignment, Timestamp, Yard, YardId,
};
use crate::error::{CacheError, StoreError};

/// Everything needed to commit one placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCommit {
    pub block_id: BlockId,
    pub container_number: String,
    pub anchor: Cell,
    pub attributes: ContainerAttributes,
    pub placed_at: Timestamp,
}

/// Durable yard topology and container records.
#[async_trait]
pub trait TopologyStore: Send + Sync {
    async fn find_yard(&self, name: &str) -> Result<Option<Yard>, StoreError>;

    async fn find_block(&self, yard_id: YardId, name: &str) -> Result<Option<Block>, StoreError>;

    /// All plans of the yard's blocks, in ascending plan id.
    async fn plans_for_yard(&self, yard_id: YardId) -> Result<Vec<PlanAssignment>, StoreError>;

    async fn find_container(&self, container_number: &str)
        -> Result<Option<Container>, StoreError>;

    /// Placed containers of `block_id` covering at least one cell of the
    /// slot/row window.
    async fn placed_in_region(
        &self,
        block_id: BlockId,
        slots: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
    ) -> Result<Vec<Container>, StoreError>;

    /// Upsert a placement as one atomic unit.
    ///
    /// Fails with `CellOccupied` if any target cell is held by a placed
    /// container, or `ContainerAlreadyPlaced` if the number is currently
    /// placed. A failed commit changes nothing.
    async fn commit_placement(&self, commit: PlacementCommit) -> Result<Container, StoreError>;

    /// Clear the placement of a container of `yard_id` as one atomic unit.
    ///
    /// Fails with `ContainerNotFound` if the number is unknown or belongs to
    /// another yard, `NotPlaced` if it is not currently placed.
    async fn commit_pickup(
        &self,
        yard_id: YardId,
        container_number: &str,
        picked_up_at: Timestamp,
    ) -> Result<Container, StoreError>;

    /// Counter that changes whenever a placement or pickup commits in the
    /// block. Cache writers compare it before and after a write to detect
    /// commits they raced with.
    async fn block_generation(&self, block_id: BlockId) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Cache-aside byte store. A miss is `Ok(None)`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    async fn ping(&self) -> Result<(), CacheError>;
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}
