//! # Positions and Footprints
//!
//! `Cell` is the occupancy key inside one block. It is a plain struct, so
//! `(1, 11, 1)` and `(11, 1, 1)` can never alias each other the way a
//! concatenated string key would.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One (slot, row, tier) coordinate inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
}

impl Cell {
    pub const fn new(slot: u32, row: u32, tier: u32) -> Self {
        Self { slot, row, tier }
    }

    /// Same row and tier, `offset` slots further along.
    pub fn shifted(self, offset: u32) -> Self {
        Self {
            slot: self.slot.saturating_add(offset),
            ..self
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {} row {} tier {}", self.slot, self.row, self.tier)
    }
}

/// Caller-facing placement coordinate, qualified by block name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub block: String,
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
}

impl Position {
    pub fn new(block: impl Into<String>, cell: Cell) -> Self {
        Self {
            block: block.into(),
            slot: cell.slot,
            row: cell.row,
            tier: cell.tier,
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.slot, self.row, self.tier)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block {} slot {} row {} tier {}",
            self.block, self.slot, self.row, self.tier
        )
    }
}

/// Number of adjacent slots a container covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Footprint {
    /// 20ft: one slot.
    Single,
    /// 40ft: slots `s` and `s + 1` at the same row and tier.
    Double,
}

impl Footprint {
    pub fn slots(self) -> u32 {
        match self {
            Footprint::Single => 1,
            Footprint::Double => 2,
        }
    }

    /// Last slot covered when anchored at `slot`.
    pub fn last_slot(self, slot: u32) -> u32 {
        slot.saturating_add(self.slots() - 1)
    }

    /// Every cell covered when anchored at `anchor`, lowest slot first.
    pub fn cells(self, anchor: Cell) -> impl Iterator<Item = Cell> {
        (0..self.slots()).map(move |offset| anchor.shifted(offset))
    }
}
