//! Coordinate mapper and viewport tests
//!
//! Verifies pixel-to-cell conversion, clamping behavior, visible ranges,
//! and scroll-into-view target computation.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridsel::{CellPosition, EngineConfig, GridGeometry, Viewport};

fn test_config(rows: u32, cols: u32, row_height: f32, col_width: f32) -> EngineConfig {
    EngineConfig {
        row_count: rows,
        col_count: cols,
        row_height,
        col_width,
        ..EngineConfig::default()
    }
}

// =============================================================================
// COORDINATE MAPPER
// =============================================================================

#[test]
fn test_cell_at_inverts_pixel_formula() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    // cell_at(col*W + eps, row*H + eps, 0, 0) == (row, col) for eps within the cell
    for row in [0u32, 1, 7, 50, 99] {
        for col in [0u32, 1, 12, 25] {
            for eps in [0.0f32, 0.5, 10.0, 19.0] {
                let x = col as f32 * 80.0 + eps * 4.0; // scale eps under col width
                let y = row as f32 * 20.0 + eps;
                let got = geom.cell_at(x.min(col as f32 * 80.0 + 79.9), y, 0.0, 0.0);
                assert_eq!(
                    got,
                    CellPosition::new(row, col),
                    "inversion failed at row {row} col {col} eps {eps}"
                );
            }
        }
    }
}

#[test]
fn test_cell_at_applies_scroll_offset() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    assert_eq!(geom.cell_at(10.0, 10.0, 0.0, 0.0), CellPosition::new(0, 0));
    assert_eq!(
        geom.cell_at(10.0, 10.0, 800.0, 200.0),
        CellPosition::new(10, 10)
    );
}

#[test]
fn test_cell_at_clamps_negative_offsets_to_origin() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    assert_eq!(
        geom.cell_at(-500.0, -500.0, 0.0, 0.0),
        CellPosition::new(0, 0)
    );
}

#[test]
fn test_cell_at_clamps_past_the_last_cell() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    assert_eq!(
        geom.cell_at(1e7, 1e7, 0.0, 0.0),
        CellPosition::new(99, 25)
    );
}

#[test]
fn test_cell_at_is_pure() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    let a = geom.cell_at(123.0, 456.0, 78.0, 90.0);
    let b = geom.cell_at(123.0, 456.0, 78.0, 90.0);
    assert_eq!(a, b);
}

#[test]
fn test_content_size() {
    let geom = GridGeometry::new(&test_config(1000, 26, 24.0, 100.0));
    assert_eq!(geom.content_width(), 2600.0);
    assert_eq!(geom.content_height(), 24000.0);
}

// =============================================================================
// VIEWPORT
// =============================================================================

#[test]
fn test_visible_ranges_at_origin() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    let viewport = Viewport::new(400.0, 300.0);
    let (start_row, end_row) = viewport.visible_rows(&geom);
    let (start_col, end_col) = viewport.visible_cols(&geom);
    assert_eq!(start_row, 0);
    assert_eq!(end_row, 15); // 300 / 20
    assert_eq!(start_col, 0);
    assert_eq!(end_col, 5); // 400 / 80
}

#[test]
fn test_max_scroll_zero_when_content_fits() {
    let geom = GridGeometry::new(&test_config(5, 2, 20.0, 80.0));
    let viewport = Viewport::new(400.0, 300.0);
    assert_eq!(viewport.max_scroll(&geom), (0.0, 0.0));
}

#[test]
fn test_clamp_scroll_restores_valid_offsets() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    let mut viewport = Viewport::new(400.0, 300.0);
    viewport.scroll_x = 99_999.0;
    viewport.scroll_y = -5.0;
    viewport.clamp_scroll(&geom);
    assert_eq!(viewport.scroll_x, 26.0 * 80.0 - 400.0);
    assert_eq!(viewport.scroll_y, 0.0);
}

#[test]
fn test_scroll_into_view_already_visible() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    let viewport = Viewport::new(400.0, 300.0);
    assert!(viewport.scroll_into_view(5, 3, &geom).is_none());
}

#[test]
fn test_scroll_into_view_scrolls_minimum_distance() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    let mut viewport = Viewport::new(400.0, 300.0);
    viewport.scroll_x = 200.0;
    viewport.scroll_y = 200.0;

    // Cell below and right of the visible area lands on the far edges.
    let (x, y) = viewport.scroll_into_view(40, 12, &geom).unwrap();
    assert_eq!(x, 13.0 * 80.0 - 400.0); // right edge of col 12 at viewport right
    assert_eq!(y, 41.0 * 20.0 - 300.0); // bottom edge of row 40 at viewport bottom

    // Cell above and left lands on the near edges.
    let (x, y) = viewport.scroll_into_view(2, 1, &geom).unwrap();
    assert_eq!(x, 80.0);
    assert_eq!(y, 40.0);
}

#[test]
fn test_apply_delta_reports_applied_movement() {
    let geom = GridGeometry::new(&test_config(100, 26, 20.0, 80.0));
    let mut viewport = Viewport::new(400.0, 300.0);
    let (dx, dy) = viewport.apply_delta(50.0, 60.0, &geom).unwrap();
    assert_eq!(dx, 50.0);
    assert_eq!(dy, 60.0);
    // At the origin, a pure negative delta is fully absorbed by the clamp.
    viewport.scroll_x = 0.0;
    viewport.scroll_y = 0.0;
    assert!(viewport.apply_delta(-10.0, 0.0, &geom).is_none());
}
