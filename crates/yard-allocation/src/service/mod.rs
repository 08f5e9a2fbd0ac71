//! # Slot Allocation Service
//!
//! Application service implementing [`YardAllocationApi`].
//!
//! ## Flow
//!
//! ```text
//! suggest:  yard ─→ plans (cache) ─→ occupancy (cache) ─→ finder ─→ Position
//! place:    yard ─→ block ─→ bounds ─→ store.commit_placement ─→ invalidate
//! pickup:   yard ─→ store.commit_pickup ─→ invalidate
//! ```
//!
//! The service keeps no lock of its own. Atomicity of placements and pickups
//! is delegated to the store; the cache only ever serves advisory reads.

mod cache;
mod occupancy;
#[cfg(test)]
mod tests;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use yard_telemetry::{log_yard_event, metric_inc, time_histogram};
use yard_telemetry::{FINDER_DURATION, PICKUPS, PLACEMENTS, SUGGESTIONS};

use crate::config::AllocationConfig;
use crate::domain::{
    find_position, Block, BlockId, Container, ContainerAttributes, PlanAssignment, Position, Yard,
};
use crate::error::{AllocationError, AllocationResult, StoreError};
use crate::ports::{
    CacheStore, ComponentHealth, HealthReport, PickupRequest, PlacementCommit, PlacementRequest,
    SuggestionRequest, TimeSource, TopologyStore, YardAllocationApi,
};

use cache::CacheKind;

/// Dependencies for [`SlotAllocationService`].
pub struct AllocationDependencies<S, C, T> {
    pub store: Arc<S>,
    pub cache: Arc<C>,
    pub clock: Arc<T>,
}

/// The slot allocation engine.
pub struct SlotAllocationService<S, C, T>
where
    S: TopologyStore,
    C: CacheStore,
    T: TimeSource,
{
    pub(crate) store: Arc<S>,
    pub(crate) cache: Arc<C>,
    pub(crate) clock: Arc<T>,
    pub(crate) config: AllocationConfig,
}

impl<S, C, T> SlotAllocationService<S, C, T>
where
    S: TopologyStore,
    C: CacheStore,
    T: TimeSource,
{
    pub fn new(deps: AllocationDependencies<S, C, T>, config: AllocationConfig) -> Self {
        Self {
            store: deps.store,
            cache: deps.cache,
            clock: deps.clock,
            config,
        }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    async fn require_yard(&self, name: &str) -> AllocationResult<Yard> {
        self.store
            .find_yard(name)
            .await?
            .ok_or_else(|| AllocationError::YardNotFound {
                yard: name.to_string(),
            })
    }

    async fn suggest(&self, request: &SuggestionRequest) -> AllocationResult<Position> {
        let yard = self.require_yard(&request.yard).await?;

        let tolerance = self.config.height_tolerance;
        let candidates: Vec<PlanAssignment> = self
            .plans_for(&yard)
            .await?
            .into_iter()
            .filter(|a| a.plan.accepts(&request.attributes, tolerance))
            .collect();

        if candidates.is_empty() {
            return Err(AllocationError::NoMatchingPlan {
                yard: yard.name,
                size: request.attributes.size.feet(),
                height: request.attributes.height.to_string(),
                container_type: request.attributes.container_type.to_string(),
            });
        }

        if let Some(existing) = self.store.find_container(&request.container_number).await? {
            if existing.is_placed {
                return Err(AllocationError::ContainerAlreadyPlaced {
                    container_number: existing.container_number,
                    block_id: existing.block_id,
                });
            }
        }

        let key = cache::suggestion_key(&yard.name, &request.attributes);
        if let Some(position) = self.cache_get::<Position>(CacheKind::Suggestions, &key).await {
            return Ok(position);
        }

        let footprint = request.attributes.size.footprint();
        let mut watched: Vec<(BlockId, u64)> = Vec::with_capacity(candidates.len());
        for PlanAssignment { plan, block } in &candidates {
            let (occupied, generation) = self
                .occupied(
                    block,
                    plan.start_slot..=plan.end_slot,
                    plan.start_row..=plan.end_row,
                )
                .await?;
            watched.push((block.id, generation));

            let found = {
                let _timer = time_histogram!(FINDER_DURATION);
                find_position(plan, block.bounds, footprint, &occupied)
            };

            match found {
                Some(cell) => {
                    let position = Position::new(block.name.clone(), cell);
                    debug!(
                        yard = %yard.name,
                        plan_id = plan.id,
                        position = %position,
                        "[yard] suggestion computed"
                    );
                    self.cache_put_guarded(CacheKind::Suggestions, &key, &position, &watched)
                        .await;
                    return Ok(position);
                }
                None => debug!(
                    yard = %yard.name,
                    plan_id = plan.id,
                    occupied = occupied.len(),
                    "[yard] plan exhausted"
                ),
            }
        }

        Err(AllocationError::NoAvailablePosition {
            yard: yard.name,
            plans_tried: candidates.iter().map(|a| a.plan.id).collect(),
        })
    }

    async fn place(&self, request: &PlacementRequest) -> AllocationResult<Container> {
        let yard = self.require_yard(&request.yard).await?;
        let block = self
            .store
            .find_block(yard.id, &request.block)
            .await?
            .ok_or_else(|| AllocationError::BlockNotFound {
                yard: yard.name.clone(),
                block: request.block.clone(),
            })?;

        let attributes = self.resolve_attributes(request).await?;
        let cell = request.cell();
        if !block
            .bounds
            .contains_footprint(cell, attributes.size.footprint())
        {
            return Err(AllocationError::OutOfBounds {
                block: block.name,
                cell,
                max_slot: block.bounds.max_slot,
                max_row: block.bounds.max_row,
                max_tier: block.bounds.max_tier,
            });
        }

        let commit = PlacementCommit {
            block_id: block.id,
            container_number: request.container_number.clone(),
            anchor: cell,
            attributes,
            placed_at: self.clock.now(),
        };
        let container = match self.store.commit_placement(commit).await {
            Ok(container) => container,
            Err(e) => {
                // Whatever suggested this cell was stale; clear it for the retry
                if matches!(
                    e,
                    StoreError::CellOccupied { .. } | StoreError::ContainerAlreadyPlaced { .. }
                ) {
                    self.invalidate_block(&yard, block.id).await;
                }
                return Err(conflict_in_block(e, &block));
            }
        };

        self.invalidate_block(&yard, block.id).await;
        log_yard_event!(
            info,
            yard.name,
            block.name,
            "[yard] container placed",
            container = %container.container_number,
            slot = cell.slot,
            row = cell.row,
            tier = cell.tier,
            size = attributes.size.feet()
        );
        Ok(container)
    }

    /// Explicit attributes, else the container's previous ones, else the
    /// configured defaults.
    async fn resolve_attributes(
        &self,
        request: &PlacementRequest,
    ) -> AllocationResult<ContainerAttributes> {
        if let Some(attributes) = request.attributes {
            return Ok(attributes);
        }
        let previous = self.store.find_container(&request.container_number).await?;
        Ok(previous
            .map(|c| c.attributes)
            .unwrap_or(self.config.default_attributes))
    }

    async fn pickup(&self, request: &PickupRequest) -> AllocationResult<Container> {
        let not_found = || AllocationError::ContainerNotFound {
            yard: request.yard.clone(),
            container_number: request.container_number.clone(),
        };

        let yard = self.store.find_yard(&request.yard).await?.ok_or_else(not_found)?;
        let now = self.clock.now();
        let container = self
            .store
            .commit_pickup(yard.id, &request.container_number, now)
            .await
            .map_err(|e| match e {
                StoreError::ContainerNotFound { .. } => not_found(),
                other => other.into(),
            })?;

        self.invalidate_block(&yard, container.block_id).await;
        info!(
            yard = %yard.name,
            block_id = container.block_id,
            container = %container.container_number,
            "[yard] container picked up"
        );
        Ok(container)
    }
}

/// Attach the block name to store conflicts.
fn conflict_in_block(err: StoreError, block: &Block) -> AllocationError {
    match err {
        StoreError::CellOccupied {
            cell, occupied_by, ..
        } => AllocationError::PositionOccupied {
            block: block.name.clone(),
            cell,
            occupied_by,
        },
        other => other.into(),
    }
}

fn outcome<V>(result: &AllocationResult<V>, ok: &'static str) -> &'static str {
    match result {
        Ok(_) => ok,
        Err(e) => e.code(),
    }
}

#[async_trait]
impl<S, C, T> YardAllocationApi for SlotAllocationService<S, C, T>
where
    S: TopologyStore,
    C: CacheStore,
    T: TimeSource,
{
    async fn get_suggestion(&self, request: SuggestionRequest) -> AllocationResult<Position> {
        let result = self.suggest(&request).await;
        metric_inc!(SUGGESTIONS, &[outcome(&result, "found")]);
        if let Err(e) = &result {
            warn!(
                yard = %request.yard,
                container = %request.container_number,
                code = e.code(),
                "[yard] suggestion rejected: {}", e
            );
        }
        result
    }

    async fn place_container(&self, request: PlacementRequest) -> AllocationResult<()> {
        let result = self.place(&request).await;
        metric_inc!(PLACEMENTS, &[outcome(&result, "committed")]);
        if let Err(e) = &result {
            log_yard_event!(
                warn,
                request.yard,
                request.block,
                "[yard] placement rejected",
                container = %request.container_number,
                code = e.code(),
                error = %e
            );
        }
        result.map(|_| ())
    }

    async fn pickup_container(&self, request: PickupRequest) -> AllocationResult<()> {
        let result = self.pickup(&request).await;
        metric_inc!(PICKUPS, &[outcome(&result, "committed")]);
        if let Err(e) = &result {
            warn!(
                yard = %request.yard,
                container = %request.container_number,
                code = e.code(),
                "[yard] pickup rejected: {}", e
            );
        }
        result.map(|_| ())
    }

    async fn yard_plans(&self, yard: &str) -> AllocationResult<Vec<PlanAssignment>> {
        let yard = self.require_yard(yard).await?;
        self.plans_for(&yard).await
    }

    async fn health(&self) -> HealthReport {
        let store = match self.store.ping().await {
            Ok(()) => ComponentHealth::Up,
            Err(e) => ComponentHealth::Down(e.to_string()),
        };
        let cache = if !self.config.cache.enabled {
            ComponentHealth::Disabled
        } else {
            match self.cache.ping().await {
                Ok(()) => ComponentHealth::Up,
                Err(e) => ComponentHealth::Down(e.to_string()),
            }
        };
        HealthReport { store, cache }
    }
}
