//! # Domain Layer
//!
//! Pure types and algorithms. No I/O, no locks, no clock.
//!
//! - `entities` - yard topology and container records
//! - `position` - cell keys, caller-facing positions, footprints
//! - `scan` - priority-ordered candidate enumeration
//! - `occupancy` - occupied-cell snapshots
//! - `finder` - first-fit position search

pub mod entities;
pub mod finder;
pub mod occupancy;
pub mod position;
pub mod scan;

pub use entities::{
    AttributeError, Block, BlockBounds, BlockId, Container, ContainerAttributes, ContainerHeight,
    ContainerSize, ContainerType, PlanAssignment, PlanId, PriorityDirection, Timestamp, Yard,
    YardId, YardPlan, HEIGHT_TOLERANCE,
};
pub use finder::find_position;
pub use occupancy::OccupancySnapshot;
pub use position::{Cell, Footprint, Position};
pub use scan::ScanOrder;
