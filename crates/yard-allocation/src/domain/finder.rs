//! # Position Finder
//!
//! First-fit search over a plan region. Pure: the same plan, bounds, footprint
//! and snapshot always give the same answer.
//!
//! A candidate anchor is accepted when
//! - the whole footprint stays inside the plan region (`slot + 1 <= end_slot`
//!   for 40ft), and
//! - none of the footprint's cells is in the snapshot.
//!
//! The first accepted candidate in [`ScanOrder`] wins. There is no cost
//! function and no look-ahead.

use super::entities::{BlockBounds, YardPlan};
use super::occupancy::OccupancySnapshot;
use super::position::{Cell, Footprint};
use super::scan::ScanOrder;

/// Returns the anchor cell of the first free position, or `None` when the
/// region is exhausted.
pub fn find_position(
    plan: &YardPlan,
    bounds: BlockBounds,
    footprint: Footprint,
    occupied: &OccupancySnapshot,
) -> Option<Cell> {
    let mut scan = ScanOrder::for_plan(plan, bounds);
    let end_slot = scan.last_slot();

    scan.find(|&anchor| {
        footprint.last_slot(anchor.slot) <= end_slot && occupied.is_free(anchor, footprint)
    })
}
