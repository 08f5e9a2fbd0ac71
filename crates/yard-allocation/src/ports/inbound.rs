//! Inbound Ports (Driving Ports)
//!
//! The three transactional operations plus plan listing and health.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Cell, ContainerAttributes, PlanAssignment, Position};
use crate::error::AllocationResult;

/// Ask where a container should go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub yard: String,
    pub container_number: String,
    pub attributes: ContainerAttributes,
}

/// Commit a container to a specific position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub yard: String,
    pub block: String,
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
    pub container_number: String,
    /// Falls back to the container's previous attributes, then to the
    /// configured defaults.
    #[serde(default)]
    pub attributes: Option<ContainerAttributes>,
}

impl PlacementRequest {
    /// Placement at a position returned by a suggestion.
    pub fn at(
        yard: impl Into<String>,
        position: &Position,
        container_number: impl Into<String>,
        attributes: Option<ContainerAttributes>,
    ) -> Self {
        Self {
            yard: yard.into(),
            block: position.block.clone(),
            slot: position.slot,
            row: position.row,
            tier: position.tier,
            container_number: container_number.into(),
            attributes,
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.slot, self.row, self.tier)
    }
}

/// Remove a placed container from the yard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupRequest {
    pub yard: String,
    pub container_number: String,
}

/// Reachability of one collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ComponentHealth {
    Up,
    Down(String),
    Disabled,
}

impl ComponentHealth {
    pub fn is_up(&self) -> bool {
        matches!(self, ComponentHealth::Up)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub store: ComponentHealth,
    pub cache: ComponentHealth,
}

impl HealthReport {
    /// The engine can serve requests as long as the store is reachable.
    pub fn is_healthy(&self) -> bool {
        self.store.is_up()
    }

    /// Serving, but without the cache.
    pub fn is_degraded(&self) -> bool {
        self.is_healthy() && matches!(self.cache, ComponentHealth::Down(_))
    }
}

/// Slot allocation API (Driving Port)
#[async_trait]
pub trait YardAllocationApi: Send + Sync {
    /// First free position for the given attributes. Advisory only: nothing
    /// is reserved.
    async fn get_suggestion(&self, request: SuggestionRequest) -> AllocationResult<Position>;

    /// Atomically validate and commit a placement.
    async fn place_container(&self, request: PlacementRequest) -> AllocationResult<()>;

    /// Atomically clear the placement of a container.
    async fn pickup_container(&self, request: PickupRequest) -> AllocationResult<()>;

    /// Plans of a yard together with their blocks.
    async fn yard_plans(&self, yard: &str) -> AllocationResult<Vec<PlanAssignment>>;

    async fn health(&self) -> HealthReport;
}
