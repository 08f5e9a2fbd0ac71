//! # Occupancy Snapshot
//!
//! The set of cells occupied by placed containers in one block at one point
//! in time. A 40ft container contributes both of its cells.

use super::entities::{BlockId, Container};
use super::position::{Cell, Footprint};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySnapshot {
    pub block_id: BlockId,
    cells: HashSet<Cell>,
}

impl OccupancySnapshot {
    pub fn empty(block_id: BlockId) -> Self {
        Self {
            block_id,
            cells: HashSet::new(),
        }
    }

    /// Build from container records of `block_id`.
    ///
    /// Records of other blocks and records with `is_placed = false` are ignored.
    pub fn from_containers<'a, I>(block_id: BlockId, containers: I) -> Self
    where
        I: IntoIterator<Item = &'a Container>,
    {
        let cells = containers
            .into_iter()
            .filter(|c| c.is_placed && c.block_id == block_id)
            .flat_map(Container::occupied_cells)
            .collect();
        Self { block_id, cells }
    }

    /// Cells intersecting the slot/row window, across all tiers.
    pub fn window(&self, slots: RangeInclusive<u32>, rows: RangeInclusive<u32>) -> Self {
        let cells = self
            .cells
            .iter()
            .filter(|cell| slots.contains(&cell.slot) && rows.contains(&cell.row))
            .copied()
            .collect();
        Self {
            block_id: self.block_id,
            cells,
        }
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// True if no cell of the footprint anchored at `anchor` is occupied.
    pub fn is_free(&self, anchor: Cell, footprint: Footprint) -> bool {
        footprint.cells(anchor).all(|cell| !self.is_occupied(cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
