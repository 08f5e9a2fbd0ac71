//! # Yard Runtime
//!
//! Process wiring for the yard allocation engine.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (environment)
//! 2. Initialize telemetry
//! 3. Seed the topology store (file or built-in `YRD1`)
//! 4. Wire store, cache and clock into the service
//! 5. Serve JSON requests on stdin/stdout until EOF or Ctrl+C
//!
//! ## Modules
//!
//! - `config` - Runtime configuration
//! - `seed` - Topology seed files
//! - `server` - Line-delimited JSON request loop

pub mod config;
pub mod seed;
pub mod server;

pub use config::RuntimeConfig;
pub use seed::{SeedError, SeedSummary, TopologySeed};
pub use server::{shutdown_on, LoopStats, RequestLoop};

use std::sync::Arc;
use tracing::info;
use yard_allocation::{
    AllocationDependencies, InMemoryCache, InMemoryTopologyStore, SlotAllocationService,
    SystemTimeSource,
};

/// The service as wired by this runtime.
pub type RuntimeService =
    SlotAllocationService<InMemoryTopologyStore, InMemoryCache, SystemTimeSource>;

/// Seed a fresh store and wire it into a service.
pub fn build_service(config: &RuntimeConfig) -> Result<(RuntimeService, SeedSummary), SeedError> {
    let seed = match &config.seed_path {
        Some(path) => {
            info!(path = %path.display(), "[yard] loading topology seed");
            TopologySeed::load(path)?
        }
        None => TopologySeed::default(),
    };

    let store = InMemoryTopologyStore::new();
    let summary = seed.apply(&store)?;

    let service = SlotAllocationService::new(
        AllocationDependencies {
            store: Arc::new(store),
            cache: Arc::new(InMemoryCache::new(config.allocation.cache.capacity)),
            clock: Arc::new(SystemTimeSource),
        },
        config.allocation.clone(),
    );
    Ok((service, summary))
}
