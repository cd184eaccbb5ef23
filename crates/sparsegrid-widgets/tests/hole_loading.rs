#![forbid(unsafe_code)]

//! Hole loading scenarios driven through the engine.

mod common;

use common::{Recorder, phone, with_gaps};
use sparsegrid_widgets::{GridConfig, HoleLocation, SparseItemGrid};

fn three_holes() -> sparsegrid_widgets::Items {
    with_gaps(1_000, &[(100, 200), (400, 500), (700, 800)], |(start, _)| start)
}

fn engine() -> SparseItemGrid<Recorder> {
    let mut grid = SparseItemGrid::new(Recorder::default(), GridConfig::default()).unwrap();
    grid.update(phone(), three_holes());
    grid
}

#[test]
fn top_of_collection_has_no_gap() {
    let grid = engine();
    assert!(grid.binding().holes.is_empty());
    assert!(grid.placeholders().is_empty());
}

#[test]
fn scrolling_into_first_hole_loads_toward_upper() {
    let mut grid = engine();
    grid.scroll_to_item(105);

    let holes = &grid.binding().holes;
    assert_eq!(holes.len(), 1);
    let (anchor, location, _) = holes[0];
    assert_eq!(anchor.index, 100);
    assert_eq!(location, HoleLocation::TowardUpper);
    assert!(!grid.placeholders().is_empty());
}

#[test]
fn gap_below_anchor_loads_toward_lower() {
    let mut grid = SparseItemGrid::new(Recorder::default(), GridConfig::default()).unwrap();
    grid.update(phone(), with_gaps(1_000, &[(100, 200)], |(_, end)| end));
    grid.scroll_to_item(150);

    let (anchor, location, _) = grid.binding().holes[0];
    assert_eq!(anchor.index, 200);
    assert_eq!(location, HoleLocation::TowardLower);
}

#[test]
fn overlapping_triggers_issue_one_load() {
    let mut grid = engine();
    grid.scroll_to_item(105);
    grid.scroll_to_item(120);
    grid.scroll_to_offset(grid.current_viewport().unwrap().offset() + 40.0);
    grid.scroll_to_item(402);

    assert_eq!(grid.binding().holes.len(), 1);
    assert_eq!(grid.hole_loader().issued(), 1);
    assert!(grid.hole_loader().is_loading());
}

#[test]
fn completion_rechecks_open_gap() {
    let mut grid = engine();
    grid.scroll_to_item(105);
    let (_, _, ticket) = grid.binding().holes[0];

    // The collaborator could not fill anything; the gap is still visible.
    assert!(grid.hole_load_completed(ticket));
    assert_eq!(grid.binding().holes.len(), 2);
    assert_ne!(grid.binding().holes[1].2, ticket);
}

#[test]
fn completion_after_fill_stays_quiet() {
    let mut grid = engine();
    grid.scroll_to_item(105);
    let (_, _, ticket) = grid.binding().holes[0];

    let filled = with_gaps(1_000, &[(400, 500), (700, 800)], |(start, _)| start);
    grid.update(phone(), filled);
    assert!(grid.hole_load_completed(ticket));

    assert_eq!(grid.binding().holes.len(), 1);
    assert!(!grid.hole_loader().is_loading());
    assert!(grid.placeholders().is_empty());
}

#[test]
fn stale_completion_is_ignored() {
    let mut grid = engine();
    grid.scroll_to_item(105);
    let (_, _, first) = grid.binding().holes[0];
    assert!(grid.hole_load_completed(first));
    let (_, _, second) = grid.binding().holes[1];

    assert!(!grid.hole_load_completed(first));
    assert_eq!(grid.hole_loader().in_flight(), Some(second));
}

#[test]
fn list_mode_requests_without_placeholders() {
    let mut grid = SparseItemGrid::new(Recorder::default(), GridConfig::default()).unwrap();
    grid.update(phone().with_fixed_item_height(Some(60.0)), three_holes());
    grid.scroll_to_item(398);

    let (anchor, location, _) = grid.binding().holes[0];
    assert_eq!(anchor.index, 400);
    assert_eq!(location, HoleLocation::TowardUpper);
    assert!(grid.placeholders().is_empty());
}
