//! # Scan Order
//!
//! Lazy enumeration of candidate cells for a plan region.
//!
//! Both priority policies are the same three-axis odometer; they differ only
//! in which axis is outermost:
//!
//! ```text
//! LEFT_TO_RIGHT   tier (outer) → row → slot (inner)
//! BOTTOM_TO_TOP   slot (outer) → row → tier (inner)
//! ```
//!
//! Every axis runs ascending and inclusive. The sequence is finite and a fresh
//! `ScanOrder` always starts from the first cell again.

use super::entities::{BlockBounds, PriorityDirection, YardPlan};
use super::position::Cell;
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Slot,
    Row,
    Tier,
}

impl Axis {
    /// Axes from outermost to innermost.
    fn nesting(direction: PriorityDirection) -> [Axis; 3] {
        match direction {
            PriorityDirection::LeftToRight => [Axis::Tier, Axis::Row, Axis::Slot],
            PriorityDirection::BottomToTop => [Axis::Slot, Axis::Row, Axis::Tier],
        }
    }

    fn get(self, cell: &Cell) -> u32 {
        match self {
            Axis::Slot => cell.slot,
            Axis::Row => cell.row,
            Axis::Tier => cell.tier,
        }
    }

    fn set(self, cell: &mut Cell, value: u32) {
        match self {
            Axis::Slot => cell.slot = value,
            Axis::Row => cell.row = value,
            Axis::Tier => cell.tier = value,
        }
    }
}

/// Iterator over the cells of a region in priority order.
#[derive(Debug, Clone)]
pub struct ScanOrder {
    nesting: [Axis; 3],
    slots: RangeInclusive<u32>,
    rows: RangeInclusive<u32>,
    tiers: RangeInclusive<u32>,
    next: Option<Cell>,
    remaining: usize,
}

impl ScanOrder {
    pub fn new(
        direction: PriorityDirection,
        slots: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
        tiers: RangeInclusive<u32>,
    ) -> Self {
        let remaining = axis_len(&slots) * axis_len(&rows) * axis_len(&tiers);
        let next = (remaining > 0).then(|| Cell::new(*slots.start(), *rows.start(), *tiers.start()));

        Self {
            nesting: Axis::nesting(direction),
            slots,
            rows,
            tiers,
            next,
            remaining,
        }
    }

    /// Scan of a plan region, clamped to the block so that every cell is in bounds.
    ///
    /// Tiers always span `1..=max_tier`.
    pub fn for_plan(plan: &YardPlan, bounds: BlockBounds) -> Self {
        Self::new(
            plan.priority,
            plan.start_slot.max(1)..=plan.end_slot.min(bounds.max_slot),
            plan.start_row.max(1)..=plan.end_row.min(bounds.max_row),
            1..=bounds.max_tier,
        )
    }

    /// Highest slot of the scanned region.
    pub fn last_slot(&self) -> u32 {
        *self.slots.end()
    }

    fn range(&self, axis: Axis) -> &RangeInclusive<u32> {
        match axis {
            Axis::Slot => &self.slots,
            Axis::Row => &self.rows,
            Axis::Tier => &self.tiers,
        }
    }

    /// Odometer step: bump the innermost axis that has room, reset the ones inside it.
    fn successor(&self, current: Cell) -> Option<Cell> {
        for depth in (0..self.nesting.len()).rev() {
            let axis = self.nesting[depth];
            let range = self.range(axis);
            if axis.get(&current) < *range.end() {
                let mut next = current;
                axis.set(&mut next, axis.get(&current) + 1);
                for &inner in &self.nesting[depth + 1..] {
                    inner.set(&mut next, *self.range(inner).start());
                }
                return Some(next);
            }
        }
        None
    }
}

fn axis_len(range: &RangeInclusive<u32>) -> usize {
    if range.is_empty() {
        0
    } else {
        (*range.end() - *range.start()) as usize + 1
    }
}

impl Iterator for ScanOrder {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let current = self.next?;
        self.next = self.successor(current);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ScanOrder {}

impl FusedIterator for ScanOrder {}
