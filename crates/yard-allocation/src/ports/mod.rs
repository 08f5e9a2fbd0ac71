//! Ports Layer
//!
//! - Driving port (inbound): the allocation API offered to the request layer
//! - Driven ports (outbound): topology store, cache, clock

pub mod inbound;
pub mod outbound;

pub use inbound::{
    ComponentHealth, HealthReport, PickupRequest, PlacementRequest, SuggestionRequest,
    YardAllocationApi,
};
pub use outbound::{CacheStore, PlacementCommit, TimeSource, TopologyStore};
