//! # Slot Allocation Service Tests

use super::*;
use crate::adapters::{FixedTimeSource, InMemoryCache, InMemoryTopologyStore};
use crate::error::CacheError;
use parking_lot::Mutex;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::time::Duration;
use crate::config::AllocationConfig;
use crate::domain::{
    BlockBounds, Cell, ContainerHeight, ContainerSize, ContainerType, PriorityDirection,
};
use crate::error::ErrorKind;
use crate::ports::TopologyStore;
use crate::test_utils::{
    dry20, dry20_high_cube, dry40, harness_with, lc01_harness, lc01_topology, Harness, START_TIME,
};

fn suggestion(number: &str, attributes: ContainerAttributes) -> SuggestionRequest {
    SuggestionRequest {
        yard: "YRD1".to_string(),
        container_number: number.to_string(),
        attributes,
    }
}

fn placement(number: &str, cell: Cell, attributes: Option<ContainerAttributes>) -> PlacementRequest {
    PlacementRequest {
        yard: "YRD1".to_string(),
        block: "LC01".to_string(),
        slot: cell.slot,
        row: cell.row,
        tier: cell.tier,
        container_number: number.to_string(),
        attributes,
    }
}

fn pickup(number: &str) -> PickupRequest {
    PickupRequest {
        yard: "YRD1".to_string(),
        container_number: number.to_string(),
    }
}

async fn place_at(h: &Harness, number: &str, cell: Cell, attributes: ContainerAttributes) {
    h.service
        .place_container(placement(number, cell, Some(attributes)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_block_suggests_plan_origin() {
    let h = lc01_harness();
    let position = h
        .service
        .get_suggestion(suggestion("MSCU0000001", dry20()))
        .await
        .unwrap();
    assert_eq!(position, Position::new("LC01", Cell::new(1, 1, 1)));
}

#[tokio::test]
async fn test_suggestion_advances_slot_after_placement() {
    let h = lc01_harness();
    place_at(&h, "MSCU0000001", Cell::new(1, 1, 1), dry20()).await;

    let position = h
        .service
        .get_suggestion(suggestion("MSCU0000002", dry20()))
        .await
        .unwrap();
    assert_eq!(position.cell(), Cell::new(2, 1, 1));
}

#[tokio::test]
async fn test_forty_foot_suggestion_skips_last_slot_of_plan() {
    let h = lc01_harness();
    place_at(&h, "C40", Cell::new(4, 1, 1), dry40()).await;
    place_at(&h, "C20", Cell::new(6, 1, 1), dry20()).await;

    // Row 1 tier 1: 4/5 held by C40, 6 held by C20, 7 would overhang slot 8
    let position = h
        .service
        .get_suggestion(suggestion("NEW40", dry40()))
        .await
        .unwrap();
    assert_eq!(position.cell(), Cell::new(4, 2, 1));
}

#[tokio::test]
async fn test_first_forty_foot_suggestion() {
    let h = lc01_harness();
    let position = h
        .service
        .get_suggestion(suggestion("NEW40", dry40()))
        .await
        .unwrap();
    assert_eq!(position.cell(), Cell::new(4, 1, 1));
}

#[tokio::test]
async fn test_high_cube_uses_its_own_plan() {
    let h = lc01_harness();
    let position = h
        .service
        .get_suggestion(suggestion("HC1", dry20_high_cube()))
        .await
        .unwrap();
    assert_eq!(position.cell(), Cell::new(8, 1, 1));
}

#[tokio::test]
async fn test_placement_outside_block_rejected() {
    let h = lc01_harness();
    let err = h
        .service
        .place_container(placement("C1", Cell::new(11, 1, 1), Some(dry20())))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(err.code(), "OUT_OF_BOUNDS");

    let err = h
        .service
        .place_container(placement("C2", Cell::new(1, 1, 0), Some(dry20())))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(h.store.occupied_cell_count(), 0);
}

#[tokio::test]
async fn test_forty_foot_on_last_block_slot_rejected() {
    let h = lc01_harness();
    let err = h
        .service
        .place_container(placement("C40", Cell::new(10, 1, 1), Some(dry40())))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfBounds);
    assert_eq!(h.store.occupied_cell_count(), 0);
}

#[tokio::test]
async fn test_suggest_then_place_succeeds() {
    let h = lc01_harness();
    for (i, attributes) in [dry20(), dry40(), dry20_high_cube(), dry20()].into_iter().enumerate() {
        let number = format!("SEQ{i}");
        let position = h
            .service
            .get_suggestion(suggestion(&number, attributes))
            .await
            .unwrap();
        h.service
            .place_container(PlacementRequest::at("YRD1", &position, &number, Some(attributes)))
            .await
            .unwrap();
    }
    // 20 + 40 + 20 + 20
    assert_eq!(h.store.occupied_cell_count(), 5);
}

#[tokio::test]
async fn test_placing_onto_occupied_cell_conflicts() {
    let h = lc01_harness();
    place_at(&h, "C40", Cell::new(4, 1, 1), dry40()).await;

    let err = h
        .service
        .place_container(placement("C20", Cell::new(5, 1, 1), Some(dry20())))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AllocationError::PositionOccupied {
            block: "LC01".to_string(),
            cell: Cell::new(5, 1, 1),
            occupied_by: "C40".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_forty_foot_over_half_free_pair_leaves_no_partial_state() {
    let h = lc01_harness();
    place_at(&h, "C20", Cell::new(6, 1, 1), dry20()).await;

    let err = h
        .service
        .place_container(placement("C40", Cell::new(5, 1, 1), Some(dry40())))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(h.store.occupied_cell_count(), 1);
    assert!(h.store.find_container("C40").await.unwrap().is_none());
}

#[tokio::test]
async fn test_container_number_cannot_be_placed_twice() {
    let h = lc01_harness();
    place_at(&h, "DUP", Cell::new(1, 1, 1), dry20()).await;

    let err = h
        .service
        .place_container(placement("DUP", Cell::new(2, 1, 1), Some(dry20())))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::ContainerAlreadyPlaced { .. }));

    let err = h
        .service
        .get_suggestion(suggestion("DUP", dry20()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONTAINER_ALREADY_PLACED");
    assert_eq!(h.store.occupied_cell_count(), 1);
}

#[tokio::test]
async fn test_pickup_twice_is_not_placed() {
    let h = lc01_harness();
    place_at(&h, "C1", Cell::new(1, 1, 1), dry20()).await;
    h.clock.advance(60);
    h.service.pickup_container(pickup("C1")).await.unwrap();

    let record = h.store.find_container("C1").await.unwrap().unwrap();
    assert!(!record.is_placed);
    assert_eq!(record.placed_at, START_TIME);
    assert_eq!(record.picked_up_at, Some(START_TIME + 60));

    let err = h.service.pickup_container(pickup("C1")).await.unwrap_err();
    assert_eq!(
        err,
        AllocationError::NotPlaced {
            container_number: "C1".to_string()
        }
    );
    let unchanged = h.store.find_container("C1").await.unwrap().unwrap();
    assert_eq!(unchanged, record);
}

#[tokio::test]
async fn test_pickup_unknown_container_or_yard() {
    let h = lc01_harness();
    let err = h.service.pickup_container(pickup("GHOST")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    place_at(&h, "C1", Cell::new(1, 1, 1), dry20()).await;
    let err = h
        .service
        .pickup_container(PickupRequest {
            yard: "ELSEWHERE".to_string(),
            container_number: "C1".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONTAINER_NOT_FOUND");
    assert_eq!(h.store.occupied_cell_count(), 1);
}

#[tokio::test]
async fn test_pickup_frees_position_for_next_suggestion() {
    let h = lc01_harness();
    place_at(&h, "C1", Cell::new(1, 1, 1), dry20()).await;
    let next = h
        .service
        .get_suggestion(suggestion("C2", dry20()))
        .await
        .unwrap();
    assert_eq!(next.cell(), Cell::new(2, 1, 1));

    h.service.pickup_container(pickup("C1")).await.unwrap();
    let next = h
        .service
        .get_suggestion(suggestion("C2", dry20()))
        .await
        .unwrap();
    assert_eq!(next.cell(), Cell::new(1, 1, 1));
}

#[tokio::test]
async fn test_lookup_failures() {
    let h = lc01_harness();

    let mut request = suggestion("C1", dry20());
    request.yard = "NOPE".to_string();
    let err = h.service.get_suggestion(request).await.unwrap_err();
    assert_eq!(err.code(), "YARD_NOT_FOUND");

    let mut request = placement("C1", Cell::new(1, 1, 1), None);
    request.block = "ZZ99".to_string();
    let err = h.service.place_container(request).await.unwrap_err();
    assert_eq!(err.code(), "BLOCK_NOT_FOUND");

    let reefer = ContainerAttributes::new(
        ContainerSize::Twenty,
        ContainerHeight::STANDARD,
        ContainerType::Reefer,
    );
    let err = h
        .service
        .get_suggestion(suggestion("C1", reefer))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NO_MATCHING_PLAN");
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_exhausted_plan() {
    let (store, yard, block) = {
        let store = InMemoryTopologyStore::new();
        let yard = store.insert_yard("YRD1").unwrap();
        let block = store
            .insert_block(yard.id, "LC01", BlockBounds::new(2, 1, 1).unwrap())
            .unwrap();
        store
            .insert_plan(block.id, dry20(), 1..=2, 1..=1, PriorityDirection::BottomToTop)
            .unwrap();
        (store, yard, block)
    };
    let h = harness_with(store, yard, block, AllocationConfig::default());
    place_at(&h, "A", Cell::new(1, 1, 1), dry20()).await;
    place_at(&h, "B", Cell::new(2, 1, 1), dry20()).await;

    let err = h
        .service
        .get_suggestion(suggestion("C", dry20()))
        .await
        .unwrap_err();
    assert!(matches!(err, AllocationError::NoAvailablePosition { .. }));
    assert_eq!(err.kind(), ErrorKind::Exhausted);
}

#[tokio::test]
async fn test_second_matching_plan_used_when_first_is_full() {
    let store = InMemoryTopologyStore::new();
    let yard = store.insert_yard("YRD1").unwrap();
    let small = store
        .insert_block(yard.id, "LC01", BlockBounds::new(1, 1, 1).unwrap())
        .unwrap();
    let large = store
        .insert_block(yard.id, "LC02", BlockBounds::new(5, 5, 2).unwrap())
        .unwrap();
    let ltr = PriorityDirection::LeftToRight;
    store.insert_plan(small.id, dry20(), 1..=1, 1..=1, ltr).unwrap();
    store.insert_plan(large.id, dry20(), 3..=5, 2..=4, ltr).unwrap();
    let h = harness_with(store, yard, small, AllocationConfig::default());

    let first = h
        .service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    assert_eq!(first, Position::new("LC01", Cell::new(1, 1, 1)));
    h.service
        .place_container(PlacementRequest::at("YRD1", &first, "A", None))
        .await
        .unwrap();

    let second = h
        .service
        .get_suggestion(suggestion("B", dry20()))
        .await
        .unwrap();
    assert_eq!(second, Position::new("LC02", Cell::new(3, 2, 1)));
}

#[tokio::test]
async fn test_placement_attribute_fallbacks() {
    let h = lc01_harness();

    // No attributes and no record: configured default (20ft)
    h.service
        .place_container(placement("NEW", Cell::new(1, 1, 1), None))
        .await
        .unwrap();
    let record = h.store.find_container("NEW").await.unwrap().unwrap();
    assert_eq!(record.attributes, h.service.config().default_attributes);
    assert_eq!(h.store.occupied_cell_count(), 1);

    // Previous record was 40ft: reused
    place_at(&h, "OLD40", Cell::new(4, 1, 1), dry40()).await;
    h.service.pickup_container(pickup("OLD40")).await.unwrap();
    h.service
        .place_container(placement("OLD40", Cell::new(4, 3, 1), None))
        .await
        .unwrap();
    let record = h.store.find_container("OLD40").await.unwrap().unwrap();
    assert_eq!(record.attributes.size, ContainerSize::Forty);
    assert_eq!(h.store.occupied_cell_count(), 3);
}

#[tokio::test]
async fn test_placement_invalidates_block_entries() {
    let h = lc01_harness();
    let key = cache::suggestion_key("YRD1", &dry20());
    let high_cube_key = cache::suggestion_key("YRD1", &dry20_high_cube());
    let occupancy = cache::occupancy_key(h.block.id);

    let first = h
        .service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    h.service
        .get_suggestion(suggestion("HC", dry20_high_cube()))
        .await
        .unwrap();
    assert!(h.cache.contains(&key));
    assert!(h.cache.contains(&high_cube_key));
    assert!(h.cache.contains(&occupancy));
    assert!(h.cache.contains(&cache::plans_key("YRD1")));

    h.service
        .place_container(PlacementRequest::at("YRD1", &first, "A", Some(dry20())))
        .await
        .unwrap();
    assert!(!h.cache.contains(&key));
    assert!(!h.cache.contains(&high_cube_key));
    assert!(!h.cache.contains(&occupancy));
    assert!(h.cache.contains(&cache::plans_key("YRD1")));

    let next = h
        .service
        .get_suggestion(suggestion("B", dry20()))
        .await
        .unwrap();
    assert_eq!(next.cell(), Cell::new(2, 1, 1));
}

#[tokio::test]
async fn test_stale_suggestion_rejected_at_commit() {
    let h = lc01_harness();
    let first = h
        .service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();

    // A writer that bypasses the engine leaves the cached suggestion stale
    h.store
        .commit_placement(PlacementCommit {
            block_id: h.block.id,
            container_number: "OTHER".to_string(),
            anchor: first.cell(),
            attributes: dry20(),
            placed_at: START_TIME,
        })
        .await
        .unwrap();
    let stale = h
        .service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    assert_eq!(stale, first);

    let err = h
        .service
        .place_container(PlacementRequest::at("YRD1", &stale, "A", Some(dry20())))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "POSITION_OCCUPIED");
    assert_eq!(h.store.occupied_cell_count(), 1);

    // The conflict cleared the stale entries, so the retry sees the commit
    let retry = h
        .service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    assert_eq!(retry.cell(), Cell::new(2, 1, 1));
}

#[tokio::test]
async fn test_cache_outage_degrades_to_store() {
    let h = lc01_harness();
    h.cache.set_outage(Some("connection refused".into()));

    let position = h
        .service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    h.service
        .place_container(PlacementRequest::at("YRD1", &position, "A", Some(dry20())))
        .await
        .unwrap();
    let next = h
        .service
        .get_suggestion(suggestion("B", dry20()))
        .await
        .unwrap();
    assert_eq!(next.cell(), Cell::new(2, 1, 1));
    h.service.pickup_container(pickup("A")).await.unwrap();

    let health = h.service.health().await;
    assert!(health.is_healthy());
    assert!(health.is_degraded());
}

#[tokio::test]
async fn test_store_outage_is_transient() {
    let h = lc01_harness();
    h.store.set_outage(Some("db down".into()));

    let err = h
        .service
        .place_container(placement("A", Cell::new(1, 1, 1), Some(dry20())))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AllocationError::StoreUnavailable {
            reason: "db down".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::TransientStoreFailure);

    let err = h
        .service
        .get_suggestion(suggestion("B", dry20()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_disabled_cache_never_touched() {
    let (store, yard, block) = lc01_topology();
    let h = harness_with(store, yard, block, AllocationConfig::without_cache());

    let position = h
        .service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    h.service
        .place_container(PlacementRequest::at("YRD1", &position, "A", None))
        .await
        .unwrap();
    let next = h
        .service
        .get_suggestion(suggestion("B", dry20()))
        .await
        .unwrap();

    assert_eq!(next.cell(), Cell::new(2, 1, 1));
    assert!(h.cache.is_empty());
    assert_eq!(h.service.health().await.cache, ComponentHealth::Disabled);
}

#[tokio::test]
async fn test_yard_plans_listing() {
    let h = lc01_harness();
    let plans = h.service.yard_plans("YRD1").await.unwrap();
    assert_eq!(plans.len(), 3);
    assert!(plans.windows(2).all(|w| w[0].plan.id < w[1].plan.id));
    assert!(plans.iter().all(|a| a.block.name == "LC01"));
    assert_eq!(plans[1].plan.attributes, dry40());

    let err = h.service.yard_plans("NOPE").await.unwrap_err();
    assert_eq!(err.code(), "YARD_NOT_FOUND");
}

#[tokio::test]
async fn test_health_reports_store_outage() {
    let h = lc01_harness();
    let health = h.service.health().await;
    assert_eq!(health.store, ComponentHealth::Up);
    assert_eq!(health.cache, ComponentHealth::Up);

    h.store.set_outage(Some("db down".into()));
    let health = h.service.health().await;
    assert!(!health.is_healthy());
    assert!(matches!(health.store, ComponentHealth::Down(_)));
}

#[tokio::test]
async fn test_plan_mismatch_reported_before_already_placed() {
    let h = lc01_harness();
    place_at(&h, "PLACED", Cell::new(1, 1, 1), dry20()).await;

    let reefer = ContainerAttributes::new(
        ContainerSize::Twenty,
        ContainerHeight::STANDARD,
        ContainerType::Reefer,
    );
    let err = h
        .service
        .get_suggestion(suggestion("PLACED", reefer))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NO_MATCHING_PLAN");

    let err = h
        .service
        .get_suggestion(suggestion("PLACED", dry20()))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "CONTAINER_ALREADY_PLACED");
}

type Hook = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Cache that runs a one-shot hook just before the first occupancy snapshot
/// is written, after the store read that produced it.
#[derive(Default)]
struct InterleavingCache {
    inner: InMemoryCache,
    before_occupancy_write: Mutex<Option<Hook>>,
}

#[async_trait]
impl CacheStore for InterleavingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        if key.starts_with("block_occupancy:") {
            let hook = self.before_occupancy_write.lock().take();
            if let Some(hook) = hook {
                hook.await;
            }
        }
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.delete(key).await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.inner.ping().await
    }
}

#[tokio::test]
async fn test_commit_between_read_and_cache_write_is_not_cached() {
    let (store, _, block) = lc01_topology();
    let interleaving = Arc::new(InterleavingCache::default());
    let service = Arc::new(SlotAllocationService::new(
        AllocationDependencies {
            store: Arc::new(store),
            cache: Arc::clone(&interleaving),
            clock: Arc::new(FixedTimeSource::new(START_TIME)),
        },
        AllocationConfig::default(),
    ));

    let other = Arc::clone(&service);
    *interleaving.before_occupancy_write.lock() = Some(Box::pin(async move {
        other
            .place_container(placement("OTHER", Cell::new(1, 1, 1), Some(dry20())))
            .await
            .unwrap();
    }));

    // The first answer was computed before OTHER landed
    let first = service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    assert_eq!(first.cell(), Cell::new(1, 1, 1));
    assert!(!interleaving.inner.contains(&cache::occupancy_key(block.id)));
    assert!(!interleaving
        .inner
        .contains(&cache::suggestion_key("YRD1", &dry20())));

    let mut attempts = Vec::new();
    let mut position = first;
    for _ in 0..3 {
        attempts.push(position.cell());
        let result = service
            .place_container(PlacementRequest::at("YRD1", &position, "A", Some(dry20())))
            .await;
        match result {
            Ok(()) => break,
            Err(e) => assert_eq!(e.code(), "POSITION_OCCUPIED"),
        }
        position = service
            .get_suggestion(suggestion("A", dry20()))
            .await
            .unwrap();
    }
    assert_eq!(attempts, vec![Cell::new(1, 1, 1), Cell::new(2, 1, 1)]);
}

#[tokio::test]
async fn test_conflict_clears_cached_entries() {
    let h = lc01_harness();
    let key = cache::suggestion_key("YRD1", &dry20());
    let occupancy = cache::occupancy_key(h.block.id);
    h.service
        .get_suggestion(suggestion("A", dry20()))
        .await
        .unwrap();
    assert!(h.cache.contains(&key));
    assert!(h.cache.contains(&occupancy));

    // Store-level write the cache never heard about
    h.store
        .commit_placement(PlacementCommit {
            block_id: h.block.id,
            container_number: "OTHER".to_string(),
            anchor: Cell::new(1, 1, 1),
            attributes: dry20(),
            placed_at: START_TIME,
        })
        .await
        .unwrap();

    let err = h
        .service
        .place_container(placement("A", Cell::new(1, 1, 1), Some(dry20())))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!h.cache.contains(&key));
    assert!(!h.cache.contains(&occupancy));
}

/// Shared buffer for a JSON log subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_mutation_logs_keep_block_fields_apart() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let h = lc01_harness();
    place_at(&h, "LOGGED", Cell::new(1, 1, 1), dry20()).await;
    h.service.pickup_container(pickup("LOGGED")).await.unwrap();

    let output = String::from_utf8(logs.0.lock().clone()).unwrap();
    let events: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let fields_of = |message: &str| {
        events
            .iter()
            .find(|e| e["fields"]["message"] == message)
            .map(|e| e["fields"].clone())
            .unwrap()
    };

    let placed = fields_of("[yard] container placed");
    assert_eq!(placed["block"], "LC01");

    let picked = fields_of("[yard] container picked up");
    assert_eq!(picked["block_id"], h.block.id);
    assert_eq!(picked["yard"], "YRD1");
    assert!(picked.get("block").is_none());
}
