//! # Core Domain Entities
//!
//! Yard topology (yards, blocks, plans) and container placement records.

use super::position::{Cell, Footprint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type YardId = u64;
pub type BlockId = u64;
pub type PlanId = u64;

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Absolute difference under which two container heights are the same.
pub const HEIGHT_TOLERANCE: f64 = 0.01;

/// Rejected container attribute value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    #[error("container_size must be either 20 or 40, got {0}")]
    InvalidSize(u32),

    #[error("container_height must be either 8.6 or 9.6, got {0}")]
    InvalidHeight(f64),

    #[error("container_type must be one of: DRY, REEFER, OPEN_TOP, got {0}")]
    InvalidType(String),

    #[error("priority_direction must be LEFT_TO_RIGHT or BOTTOM_TO_TOP, got {0}")]
    InvalidDirection(String),
}

/// Container length class. Determines the footprint in slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ContainerSize {
    Twenty,
    Forty,
}

impl ContainerSize {
    pub fn feet(self) -> u32 {
        match self {
            ContainerSize::Twenty => 20,
            ContainerSize::Forty => 40,
        }
    }

    pub fn footprint(self) -> Footprint {
        match self {
            ContainerSize::Twenty => Footprint::Single,
            ContainerSize::Forty => Footprint::Double,
        }
    }
}

impl TryFrom<u32> for ContainerSize {
    type Error = AttributeError;

    fn try_from(feet: u32) -> Result<Self, Self::Error> {
        match feet {
            20 => Ok(ContainerSize::Twenty),
            40 => Ok(ContainerSize::Forty),
            other => Err(AttributeError::InvalidSize(other)),
        }
    }
}

impl From<ContainerSize> for u32 {
    fn from(size: ContainerSize) -> Self {
        size.feet()
    }
}

impl fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.feet())
    }
}

/// Container height in feet.
///
/// Stored as a float, so equality goes through [`ContainerHeight::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerHeight(pub f64);

impl ContainerHeight {
    pub const STANDARD: ContainerHeight = ContainerHeight(8.6);
    pub const HIGH_CUBE: ContainerHeight = ContainerHeight(9.6);

    /// Accept only the two standard heights.
    pub fn standard(value: f64) -> Result<Self, AttributeError> {
        let height = ContainerHeight(value);
        if height.matches(Self::STANDARD, HEIGHT_TOLERANCE)
            || height.matches(Self::HIGH_CUBE, HEIGHT_TOLERANCE)
        {
            Ok(height)
        } else {
            Err(AttributeError::InvalidHeight(value))
        }
    }

    pub fn feet(self) -> f64 {
        self.0
    }

    pub fn matches(self, other: ContainerHeight, tolerance: f64) -> bool {
        (self.0 - other.0).abs() < tolerance
    }
}

impl fmt::Display for ContainerHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerType {
    Dry,
    Reefer,
    OpenTop,
}

impl ContainerType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContainerType::Dry => "DRY",
            ContainerType::Reefer => "REEFER",
            ContainerType::OpenTop => "OPEN_TOP",
        }
    }
}

impl FromStr for ContainerType {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRY" => Ok(ContainerType::Dry),
            "REEFER" => Ok(ContainerType::Reefer),
            "OPEN_TOP" => Ok(ContainerType::OpenTop),
            other => Err(AttributeError::InvalidType(other.to_string())),
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan order a plan applies when looking for a free cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityDirection {
    /// Tier outermost, then row, then slot.
    LeftToRight,
    /// Slot outermost, then row, then tier.
    BottomToTop,
}

impl FromStr for PriorityDirection {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEFT_TO_RIGHT" => Ok(PriorityDirection::LeftToRight),
            "BOTTOM_TO_TOP" => Ok(PriorityDirection::BottomToTop),
            other => Err(AttributeError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for PriorityDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityDirection::LeftToRight => f.write_str("LEFT_TO_RIGHT"),
            PriorityDirection::BottomToTop => f.write_str("BOTTOM_TO_TOP"),
        }
    }
}

/// Size, height and type of a container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerAttributes {
    pub size: ContainerSize,
    pub height: ContainerHeight,
    pub container_type: ContainerType,
}

impl ContainerAttributes {
    pub fn new(size: ContainerSize, height: ContainerHeight, container_type: ContainerType) -> Self {
        Self {
            size,
            height,
            container_type,
        }
    }
}

impl Default for ContainerAttributes {
    fn default() -> Self {
        Self::new(
            ContainerSize::Twenty,
            ContainerHeight::STANDARD,
            ContainerType::Dry,
        )
    }
}

/// Top-level named storage area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yard {
    pub id: YardId,
    pub name: String,
}

/// Capacity of a block. Every coordinate is 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockBounds {
    pub max_slot: u32,
    pub max_row: u32,
    pub max_tier: u32,
}

impl BlockBounds {
    /// Returns `None` if any bound is zero.
    pub fn new(max_slot: u32, max_row: u32, max_tier: u32) -> Option<Self> {
        if max_slot == 0 || max_row == 0 || max_tier == 0 {
            return None;
        }
        Some(Self {
            max_slot,
            max_row,
            max_tier,
        })
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (1..=self.max_slot).contains(&cell.slot)
            && (1..=self.max_row).contains(&cell.row)
            && (1..=self.max_tier).contains(&cell.tier)
    }

    /// True if every cell the footprint covers from `anchor` is inside the block.
    pub fn contains_footprint(&self, anchor: Cell, footprint: Footprint) -> bool {
        footprint.cells(anchor).all(|cell| self.contains(cell))
    }
}

/// Rectangular storage grid within a yard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub yard_id: YardId,
    pub name: String,
    pub bounds: BlockBounds,
}

/// Sub-region of a block reserved for one attribute combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YardPlan {
    pub id: PlanId,
    pub block_id: BlockId,
    pub attributes: ContainerAttributes,
    pub start_slot: u32,
    pub end_slot: u32,
    pub start_row: u32,
    pub end_row: u32,
    pub priority: PriorityDirection,
}

impl YardPlan {
    /// Size and type must be equal; height is compared within `tolerance`.
    pub fn accepts(&self, attributes: &ContainerAttributes, tolerance: f64) -> bool {
        self.attributes.size == attributes.size
            && self.attributes.container_type == attributes.container_type
            && self.attributes.height.matches(attributes.height, tolerance)
    }
}

/// A plan together with the block it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAssignment {
    pub plan: YardPlan,
    pub block: Block,
}

/// Placement record of a container.
///
/// Records are never deleted: a pickup only clears `is_placed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub container_number: String,
    pub block_id: BlockId,
    /// Lowest slot the container covers.
    pub anchor: Cell,
    pub attributes: ContainerAttributes,
    pub is_placed: bool,
    pub placed_at: Timestamp,
    pub picked_up_at: Option<Timestamp>,
}

impl Container {
    /// Cells this container covers: one for 20ft, two adjacent slots for 40ft.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell> {
        self.attributes.size.footprint().cells(self.anchor)
    }
}
