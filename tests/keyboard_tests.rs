//! Keyboard navigation tests
//!
//! Arrow movement with clamping, shift-extension, and Home/End jumps with
//! and without ctrl.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use test_case::test_case;

use gridsel::{CellPosition, EngineConfig, NavKey, SelectionEngine};

fn engine_at(rows: u32, cols: u32, row: u32, col: u32) -> SelectionEngine {
    let mut engine = SelectionEngine::new(EngineConfig {
        row_count: rows,
        col_count: cols,
        ..EngineConfig::default()
    })
    .unwrap();
    engine.pointer_down_cell(row, col, false);
    engine.pointer_up();
    engine
}

#[test_case(NavKey::ArrowDown, (6, 5); "down moves one row")]
#[test_case(NavKey::ArrowUp, (4, 5); "up moves one row")]
#[test_case(NavKey::ArrowLeft, (5, 4); "left moves one col")]
#[test_case(NavKey::ArrowRight, (5, 6); "right moves one col")]
fn test_arrow_moves_one_cell(key: NavKey, expected: (u32, u32)) {
    let mut engine = engine_at(100, 26, 5, 5);
    let into_view = engine.key_down(key, false, false);
    let expected = CellPosition::new(expected.0, expected.1);
    assert_eq!(into_view, Some(expected));
    assert_eq!(engine.active_cell(), Some(expected));
    let range = engine.selection().unwrap();
    assert_eq!(range.start, expected, "plain arrow collapses the selection");
    assert_eq!(range.end, expected);
}

#[test_case(NavKey::ArrowUp, (0, 0), (0, 0); "up pinned at top")]
#[test_case(NavKey::ArrowLeft, (0, 0), (0, 0); "left pinned at origin")]
#[test_case(NavKey::ArrowDown, (99, 25), (99, 25); "down pinned at bottom")]
#[test_case(NavKey::ArrowRight, (99, 25), (99, 25); "right pinned at last col")]
fn test_arrows_clamp_at_grid_bounds(key: NavKey, from: (u32, u32), expected: (u32, u32)) {
    let mut engine = engine_at(100, 26, from.0, from.1);
    engine.key_down(key, false, false);
    assert_eq!(
        engine.active_cell(),
        Some(CellPosition::new(expected.0, expected.1))
    );
}

#[test]
fn test_arrow_down_from_5_5_matches_contract() {
    let mut engine = engine_at(1000, 26, 5, 5);
    engine.key_down(NavKey::ArrowDown, false, false);
    assert_eq!(engine.active_cell(), Some(CellPosition::new(6, 5)));
    let range = engine.selection().unwrap();
    assert_eq!(range.start, CellPosition::new(6, 5));
    assert_eq!(range.end, CellPosition::new(6, 5));
}

#[test]
fn test_shift_arrow_extends_while_anchor_stays() {
    let mut engine = engine_at(100, 26, 5, 5);
    engine.key_down(NavKey::ArrowDown, true, false);
    engine.key_down(NavKey::ArrowRight, true, false);
    let range = engine.selection().unwrap();
    assert_eq!(range.start, CellPosition::new(5, 5));
    assert_eq!(range.end, CellPosition::new(6, 6));
    assert_eq!(engine.active_cell(), Some(CellPosition::new(6, 6)));
}

#[test]
fn test_shift_then_plain_arrow_collapses() {
    let mut engine = engine_at(100, 26, 5, 5);
    engine.key_down(NavKey::ArrowDown, true, false);
    engine.key_down(NavKey::ArrowDown, false, false);
    let range = engine.selection().unwrap();
    assert!(range.is_single_cell());
    assert_eq!(range.start, CellPosition::new(7, 5));
}

#[test_case(false, (7, 0); "home jumps to col 0")]
#[test_case(true, (0, 0); "ctrl home jumps to grid origin")]
fn test_home(ctrl: bool, expected: (u32, u32)) {
    let mut engine = engine_at(100, 26, 7, 13);
    engine.key_down(NavKey::Home, false, ctrl);
    assert_eq!(
        engine.active_cell(),
        Some(CellPosition::new(expected.0, expected.1))
    );
}

#[test_case(false, (7, 25); "end jumps to last col")]
#[test_case(true, (99, 25); "ctrl end jumps to last cell")]
fn test_end(ctrl: bool, expected: (u32, u32)) {
    let mut engine = engine_at(100, 26, 7, 13);
    engine.key_down(NavKey::End, false, ctrl);
    assert_eq!(
        engine.active_cell(),
        Some(CellPosition::new(expected.0, expected.1))
    );
}

#[test]
fn test_ctrl_end_reaches_last_cell_of_large_grid() {
    for start in [(0u32, 0u32), (5, 5), (999, 0), (123, 25)] {
        let mut engine = engine_at(1000, 26, start.0, start.1);
        engine.key_down(NavKey::End, false, true);
        assert_eq!(engine.active_cell(), Some(CellPosition::new(999, 25)));
    }
}

#[test]
fn test_first_navigation_key_establishes_origin() {
    let mut engine = SelectionEngine::new(EngineConfig::default()).unwrap();
    let into_view = engine.key_down(NavKey::ArrowDown, false, false);
    assert_eq!(into_view, Some(CellPosition::new(0, 0)));
    assert_eq!(engine.active_cell(), Some(CellPosition::new(0, 0)));
    assert!(engine.selection().unwrap().is_single_cell());
}

#[test]
fn test_shift_extension_from_header_selection_keeps_its_anchor() {
    let mut engine = SelectionEngine::new(EngineConfig {
        row_count: 100,
        col_count: 26,
        ..EngineConfig::default()
    })
    .unwrap();
    engine.pointer_down_row_header(4, false);
    engine.pointer_up();
    engine.key_down(NavKey::ArrowDown, true, false);
    let range = engine.selection().unwrap();
    assert_eq!(range.start, CellPosition::new(4, 0));
}
