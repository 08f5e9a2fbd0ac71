//! Error types for the yard allocation engine.
//!
//! Every [`AllocationError`] falls into exactly one [`ErrorKind`] so the
//! request layer can branch on cause without matching on variants.

use crate::domain::{BlockId, Cell, PlanId};
use thiserror::Error;

/// Coarse classification of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    OutOfBounds,
    Conflict,
    Exhausted,
    TransientStoreFailure,
}

impl ErrorKind {
    /// Only transient store failures are worth retrying unchanged.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::TransientStoreFailure)
    }
}

/// Errors returned by the allocation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("Yard not found: {yard}")]
    YardNotFound { yard: String },

    #[error("Block not found: {block} in yard {yard}")]
    BlockNotFound { yard: String, block: String },

    #[error("Container not found: {container_number} in yard {yard}")]
    ContainerNotFound {
        yard: String,
        container_number: String,
    },

    #[error("No yard plan in {yard} accepts size {size}, height {height}, type {container_type}")]
    NoMatchingPlan {
        yard: String,
        size: u32,
        height: String,
        container_type: String,
    },

    #[error("Position {cell} is outside block {block} (max slot {max_slot}, row {max_row}, tier {max_tier})")]
    OutOfBounds {
        block: String,
        cell: Cell,
        max_slot: u32,
        max_row: u32,
        max_tier: u32,
    },

    #[error("Position {cell} in block {block} is occupied by {occupied_by}")]
    PositionOccupied {
        block: String,
        cell: Cell,
        occupied_by: String,
    },

    #[error("Container {container_number} is already placed in block {block_id}")]
    ContainerAlreadyPlaced {
        container_number: String,
        block_id: BlockId,
    },

    #[error("Container {container_number} is not currently placed")]
    NotPlaced { container_number: String },

    #[error("No available position in yard {yard} (plans tried: {plans_tried:?})")]
    NoAvailablePosition { yard: String, plans_tried: Vec<PlanId> },

    #[error("Topology store unavailable: {reason}")]
    StoreUnavailable { reason: String },
}

impl AllocationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AllocationError::YardNotFound { .. }
            | AllocationError::BlockNotFound { .. }
            | AllocationError::ContainerNotFound { .. }
            | AllocationError::NoMatchingPlan { .. } => ErrorKind::NotFound,
            AllocationError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            AllocationError::PositionOccupied { .. }
            | AllocationError::ContainerAlreadyPlaced { .. }
            | AllocationError::NotPlaced { .. } => ErrorKind::Conflict,
            AllocationError::NoAvailablePosition { .. } => ErrorKind::Exhausted,
            AllocationError::StoreUnavailable { .. } => ErrorKind::TransientStoreFailure,
        }
    }

    /// Stable machine-readable code. Never changes once published.
    pub fn code(&self) -> &'static str {
        match self {
            AllocationError::YardNotFound { .. } => "YARD_NOT_FOUND",
            AllocationError::BlockNotFound { .. } => "BLOCK_NOT_FOUND",
            AllocationError::ContainerNotFound { .. } => "CONTAINER_NOT_FOUND",
            AllocationError::NoMatchingPlan { .. } => "NO_MATCHING_PLAN",
            AllocationError::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            AllocationError::PositionOccupied { .. } => "POSITION_OCCUPIED",
            AllocationError::ContainerAlreadyPlaced { .. } => "CONTAINER_ALREADY_PLACED",
            AllocationError::NotPlaced { .. } => "NOT_PLACED",
            AllocationError::NoAvailablePosition { .. } => "NO_AVAILABLE_POSITION",
            AllocationError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
        }
    }
}

pub type AllocationResult<T> = Result<T, AllocationError>;

/// Errors from the topology store port.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Cell {cell} of block {block_id} is held by {occupied_by}")]
    CellOccupied {
        block_id: BlockId,
        cell: Cell,
        occupied_by: String,
    },

    #[error("Container {container_number} is already placed in block {block_id}")]
    ContainerAlreadyPlaced {
        container_number: String,
        block_id: BlockId,
    },

    #[error("Container not found: {container_number}")]
    ContainerNotFound { container_number: String },

    #[error("Container {container_number} is not placed")]
    NotPlaced { container_number: String },

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<StoreError> for AllocationError {
    /// Fallback mapping. The service maps conflict variants itself where it
    /// has the block and yard names at hand.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CellOccupied {
                block_id,
                cell,
                occupied_by,
            } => AllocationError::PositionOccupied {
                block: block_id.to_string(),
                cell,
                occupied_by,
            },
            StoreError::ContainerAlreadyPlaced {
                container_number,
                block_id,
            } => AllocationError::ContainerAlreadyPlaced {
                container_number,
                block_id,
            },
            StoreError::ContainerNotFound { container_number } => {
                AllocationError::ContainerNotFound {
                    yard: String::new(),
                    container_number,
                }
            }
            StoreError::NotPlaced { container_number } => {
                AllocationError::NotPlaced { container_number }
            }
            StoreError::InvalidTopology(reason) | StoreError::Unavailable { reason } => {
                AllocationError::StoreUnavailable { reason }
            }
        }
    }
}

/// Errors from the cache port. Never surfaced to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Cache payload serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}
