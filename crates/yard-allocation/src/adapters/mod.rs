//! # Adapters
//!
//! - `memory_store`: in-memory topology store with an atomic commit path
//! - `memory_cache`: in-memory LRU cache with per-entry expiry
//! - `time`: wall and fixed clocks
//! - `api_handler`: JSON request layer over [`YardAllocationApi`](crate::ports::YardAllocationApi)

pub mod api_handler;
pub mod memory_cache;
pub mod memory_store;
pub mod time;

pub use api_handler::{ApiErrorBody, ApiHandler, ApiRequest, ApiResponse};
pub use memory_cache::InMemoryCache;
pub use memory_store::InMemoryTopologyStore;
pub use time::{FixedTimeSource, SystemTimeSource};
