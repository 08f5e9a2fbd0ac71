//! # Yard Allocation Engine
//!
//! Assigns storage positions (block, slot, row, tier) to shipping containers
//! and keeps placed containers from overlapping.
//!
//! ## Architecture
//!
//! ```text
//! request layer ──→ YardAllocationApi ──→ SlotAllocationService
//!                                            │
//!                     ┌──────────────────────┼───────────────────┐
//!                     ↓                      ↓                   ↓
//!              TopologyStore            CacheStore           TimeSource
//!        (atomic commits, I/O)    (advisory reads only)
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Unique occupancy | At most one placed container per (block, slot, row, tier) |
//! | Double footprint | A 40ft container holds slots `s` and `s + 1`, both inside the block |
//! | Unique number | A container number can be placed only once at a time |
//! | Bounds | Every coordinate lies in `1..=max` of its block |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure types and algorithms (scan order, occupancy, finder)
//! - `ports/` - Inbound API trait, outbound store/cache/clock traits
//! - `adapters/` - In-memory store and cache, clocks, JSON request handler
//! - `service/` - Application service implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use yard_allocation::*;
//!
//! let store = Arc::new(InMemoryTopologyStore::new());
//! let service = SlotAllocationService::new(
//!     AllocationDependencies {
//!         store,
//!         cache: Arc::new(InMemoryCache::default()),
//!         clock: Arc::new(SystemTimeSource),
//!     },
//!     AllocationConfig::default(),
//! );
//!
//! let position = service.get_suggestion(request).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

pub use adapters::{
    ApiErrorBody, ApiHandler, ApiRequest, ApiResponse, FixedTimeSource, InMemoryCache,
    InMemoryTopologyStore, SystemTimeSource,
};
pub use config::{AllocationConfig, CacheConfig, ConfigError};
pub use domain::{
    Block, BlockBounds, Cell, Container, ContainerAttributes, ContainerHeight, ContainerSize,
    ContainerType, PlanAssignment, Position, PriorityDirection, Yard, YardPlan,
};
pub use error::{AllocationError, AllocationResult, CacheError, ErrorKind, StoreError};
pub use ports::{
    CacheStore, ComponentHealth, HealthReport, PickupRequest, PlacementRequest,
    SuggestionRequest, TimeSource, TopologyStore, YardAllocationApi,
};
pub use service::{AllocationDependencies, SlotAllocationService};
