//! Cache-aside helpers.
//!
//! Cache faults are logged and counted, then treated as a miss. Nothing in
//! this file can fail a request.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use yard_telemetry::{metric_inc, CACHE_LOOKUPS};

use super::SlotAllocationService;
use crate::domain::{BlockId, ContainerAttributes, PlanAssignment, Yard};
use crate::error::{AllocationResult, CacheError};
use crate::ports::{CacheStore, TimeSource, TopologyStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheKind {
    Plans,
    Occupancy,
    Suggestions,
}

impl CacheKind {
    fn label(self) -> &'static str {
        match self {
            CacheKind::Plans => "plans",
            CacheKind::Occupancy => "occupancy",
            CacheKind::Suggestions => "suggestions",
        }
    }
}

pub(crate) fn plans_key(yard: &str) -> String {
    format!("yard_plans:{yard}")
}

pub(crate) fn occupancy_key(block_id: BlockId) -> String {
    format!("block_occupancy:{block_id}")
}

/// Height is rounded to one decimal so 8.6 and 8.600000001 share a key.
pub(crate) fn suggestion_key(yard: &str, attributes: &ContainerAttributes) -> String {
    format!(
        "suggestions:{}:{}:{:.1}:{}",
        yard,
        attributes.size.feet(),
        attributes.height.feet(),
        attributes.container_type
    )
}

impl<S, C, T> SlotAllocationService<S, C, T>
where
    S: TopologyStore,
    C: CacheStore,
    T: TimeSource,
{
    fn ttl(&self, kind: CacheKind) -> Duration {
        let cache = &self.config.cache;
        match kind {
            CacheKind::Plans => cache.plans_ttl,
            CacheKind::Occupancy => cache.occupancy_ttl,
            CacheKind::Suggestions => cache.suggestions_ttl,
        }
    }

    pub(crate) async fn cache_get<V: DeserializeOwned>(
        &self,
        kind: CacheKind,
        key: &str,
    ) -> Option<V> {
        if !self.config.cache.enabled {
            return None;
        }

        let lookup = match self.cache.get(key).await {
            Ok(Some(bytes)) => serde_json::from_slice::<V>(&bytes).map_err(CacheError::from),
            Ok(None) => {
                metric_inc!(CACHE_LOOKUPS, &[kind.label(), "miss"]);
                debug!(key, "[yard] cache miss");
                return None;
            }
            Err(e) => Err(e),
        };

        match lookup {
            Ok(value) => {
                metric_inc!(CACHE_LOOKUPS, &[kind.label(), "hit"]);
                debug!(key, "[yard] cache hit");
                Some(value)
            }
            Err(e) => {
                metric_inc!(CACHE_LOOKUPS, &[kind.label(), "error"]);
                warn!(key, error = %e, "[yard] cache read failed, using store");
                None
            }
        }
    }

    pub(crate) async fn cache_put<V: Serialize + Sync>(&self, kind: CacheKind, key: &str, value: &V) {
        if !self.config.cache.enabled {
            return;
        }

        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, error = %e, "[yard] cache payload not serializable");
                return;
            }
        };
        if let Err(e) = self.cache.set(key, bytes, self.ttl(kind)).await {
            warn!(key, error = %e, "[yard] cache write failed");
        }
    }

    /// Write `value`, then drop it again if any watched block committed
    /// since its generation was read. A writer that read the store before a
    /// commit can land its write after that commit's invalidation; the
    /// second generation read catches that case.
    pub(crate) async fn cache_put_guarded<V: Serialize + Sync>(
        &self,
        kind: CacheKind,
        key: &str,
        value: &V,
        watched: &[(BlockId, u64)],
    ) {
        if !self.config.cache.enabled {
            return;
        }
        self.cache_put(kind, key, value).await;

        for &(block_id, seen) in watched {
            let current = self.store.block_generation(block_id).await;
            if current.as_ref().ok() != Some(&seen) {
                debug!(key, block_id, "[yard] block changed during read, discarding cache entry");
                self.cache_delete(key).await;
                return;
            }
        }
    }

    async fn cache_delete(&self, key: &str) {
        if !self.config.cache.enabled {
            return;
        }
        match self.cache.delete(key).await {
            Ok(()) => debug!(key, "[yard] cache entry invalidated"),
            Err(e) => warn!(key, error = %e, "[yard] cache invalidation failed"),
        }
    }

    /// Plans of a yard in ascending id, cache-first.
    pub(crate) async fn plans_for(&self, yard: &Yard) -> AllocationResult<Vec<PlanAssignment>> {
        let key = plans_key(&yard.name);
        if let Some(plans) = self.cache_get(CacheKind::Plans, &key).await {
            return Ok(plans);
        }

        let plans = self.store.plans_for_yard(yard.id).await?;
        self.cache_put(CacheKind::Plans, &key, &plans).await;
        Ok(plans)
    }

    /// Drop the block's occupancy snapshot and every suggestion a plan of
    /// this block could have produced.
    pub(crate) async fn invalidate_block(&self, yard: &Yard, block_id: BlockId) {
        if !self.config.cache.enabled {
            return;
        }

        self.cache_delete(&occupancy_key(block_id)).await;

        let plans = match self.plans_for(yard).await {
            Ok(plans) => plans,
            Err(e) => {
                // The commit already went through; stale suggestions age out
                warn!(yard = %yard.name, block_id, error = %e, "[yard] could not load plans for invalidation");
                return;
            }
        };

        let mut keys: Vec<String> = plans
            .iter()
            .filter(|a| a.plan.block_id == block_id)
            .map(|a| suggestion_key(&yard.name, &a.plan.attributes))
            .collect();
        keys.sort();
        keys.dedup();
        for key in keys {
            self.cache_delete(&key).await;
        }
    }
}
