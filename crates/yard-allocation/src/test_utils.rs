//! Shared fixtures for unit and service tests.

use std::sync::Arc;

use crate::adapters::{FixedTimeSource, InMemoryCache, InMemoryTopologyStore};
use crate::config::AllocationConfig;
use crate::domain::{
    Block, BlockBounds, ContainerAttributes, ContainerHeight, ContainerSize, ContainerType,
    PriorityDirection, Yard,
};
use crate::service::{AllocationDependencies, SlotAllocationService};

pub type TestService = SlotAllocationService<InMemoryTopologyStore, InMemoryCache, FixedTimeSource>;

pub const START_TIME: u64 = 1_700_000_000;

pub fn dry(size: ContainerSize, height: ContainerHeight) -> ContainerAttributes {
    ContainerAttributes::new(size, height, ContainerType::Dry)
}

pub fn dry20() -> ContainerAttributes {
    dry(ContainerSize::Twenty, ContainerHeight::STANDARD)
}

pub fn dry40() -> ContainerAttributes {
    dry(ContainerSize::Forty, ContainerHeight::STANDARD)
}

pub fn dry20_high_cube() -> ContainerAttributes {
    dry(ContainerSize::Twenty, ContainerHeight::HIGH_CUBE)
}

/// Everything a service test needs to poke at.
pub struct Harness {
    pub service: TestService,
    pub store: Arc<InMemoryTopologyStore>,
    pub cache: Arc<InMemoryCache>,
    pub clock: Arc<FixedTimeSource>,
    pub yard: Yard,
    pub block: Block,
}

/// Yard `YRD1` with block `LC01` (10 slots, 5 rows, 4 tiers) and three plans:
///
/// - 20ft 8.6 DRY: slots 1-3, rows 1-5
/// - 40ft 8.6 DRY: slots 4-7, rows 1-5
/// - 20ft 9.6 DRY: slots 8-10, rows 1-3
pub fn lc01_topology() -> (InMemoryTopologyStore, Yard, Block) {
    let store = InMemoryTopologyStore::new();
    let yard = store.insert_yard("YRD1").unwrap();
    let block = store
        .insert_block(yard.id, "LC01", BlockBounds::new(10, 5, 4).unwrap())
        .unwrap();

    let ltr = PriorityDirection::LeftToRight;
    store.insert_plan(block.id, dry20(), 1..=3, 1..=5, ltr).unwrap();
    store.insert_plan(block.id, dry40(), 4..=7, 1..=5, ltr).unwrap();
    store
        .insert_plan(block.id, dry20_high_cube(), 8..=10, 1..=3, ltr)
        .unwrap();

    (store, yard, block)
}

pub fn harness_with(store: InMemoryTopologyStore, yard: Yard, block: Block, config: AllocationConfig) -> Harness {
    let store = Arc::new(store);
    let cache = Arc::new(InMemoryCache::new(config.cache.capacity));
    let clock = Arc::new(FixedTimeSource::new(START_TIME));
    let service = SlotAllocationService::new(
        AllocationDependencies {
            store: Arc::clone(&store),
            cache: Arc::clone(&cache),
            clock: Arc::clone(&clock),
        },
        config,
    );
    Harness {
        service,
        store,
        cache,
        clock,
        yard,
        block,
    }
}

pub fn lc01_harness() -> Harness {
    let (store, yard, block) = lc01_topology();
    harness_with(store, yard, block, AllocationConfig::default())
}
