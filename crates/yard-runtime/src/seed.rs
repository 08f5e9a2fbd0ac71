//! # Topology Seed
//!
//! Loads yards, blocks and plans into the topology store at start-up.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "yards": [{
//!     "name": "YRD1",
//!     "blocks": [{
//!       "name": "LC01", "max_slot": 10, "max_row": 5, "max_tier": 4,
//!       "plans": [{
//!         "size": 20, "height": 8.6, "container_type": "DRY",
//!         "slots": [1, 3], "rows": [1, 5], "priority": "LEFT_TO_RIGHT"
//!       }]
//!     }]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use yard_allocation::{
    BlockBounds, ContainerAttributes, ContainerHeight, ContainerSize, ContainerType,
    InMemoryTopologyStore, PriorityDirection, StoreError,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed seed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Block {block} has a zero bound")]
    ZeroBounds { block: String },

    #[error("Seed rejected by store: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySeed {
    pub yards: Vec<YardSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YardSeed {
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<BlockSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSeed {
    pub name: String,
    pub max_slot: u32,
    pub max_row: u32,
    pub max_tier: u32,
    #[serde(default)]
    pub plans: Vec<PlanSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSeed {
    #[serde(flatten)]
    pub attributes: ContainerAttributes,
    /// Inclusive `[start, end]`.
    pub slots: (u32, u32),
    /// Inclusive `[start, end]`.
    pub rows: (u32, u32),
    pub priority: PriorityDirection,
}

/// Counts of what a seed created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub yards: usize,
    pub blocks: usize,
    pub plans: usize,
}

impl TopologySeed {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Insert every yard, block and plan. Stops at the first rejected entry.
    pub fn apply(&self, store: &InMemoryTopologyStore) -> Result<SeedSummary, SeedError> {
        let mut summary = SeedSummary::default();

        for yard_seed in &self.yards {
            let yard = store.insert_yard(&yard_seed.name)?;
            summary.yards += 1;

            for block_seed in &yard_seed.blocks {
                let bounds =
                    BlockBounds::new(block_seed.max_slot, block_seed.max_row, block_seed.max_tier)
                        .ok_or_else(|| SeedError::ZeroBounds {
                            block: block_seed.name.clone(),
                        })?;
                let block = store.insert_block(yard.id, &block_seed.name, bounds)?;
                summary.blocks += 1;

                for plan in &block_seed.plans {
                    store.insert_plan(
                        block.id,
                        plan.attributes,
                        plan.slots.0..=plan.slots.1,
                        plan.rows.0..=plan.rows.1,
                        plan.priority,
                    )?;
                    summary.plans += 1;
                }
            }

            info!(yard = %yard.name, blocks = yard_seed.blocks.len(), "[yard] topology seeded");
        }

        Ok(summary)
    }
}

impl Default for TopologySeed {
    /// Yard `YRD1` with block `LC01` (10 x 5 x 4) and three plans.
    fn default() -> Self {
        let plan = |size, height, slots, rows| PlanSeed {
            attributes: ContainerAttributes::new(size, height, ContainerType::Dry),
            slots,
            rows,
            priority: PriorityDirection::LeftToRight,
        };

        Self {
            yards: vec![YardSeed {
                name: "YRD1".to_string(),
                blocks: vec![BlockSeed {
                    name: "LC01".to_string(),
                    max_slot: 10,
                    max_row: 5,
                    max_tier: 4,
                    plans: vec![
                        plan(ContainerSize::Twenty, ContainerHeight::STANDARD, (1, 3), (1, 5)),
                        plan(ContainerSize::Forty, ContainerHeight::STANDARD, (4, 7), (1, 5)),
                        plan(ContainerSize::Twenty, ContainerHeight::HIGH_CUBE, (8, 10), (1, 3)),
                    ],
                }],
            }],
        }
    }
}
