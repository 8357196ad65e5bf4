//! Fixed waffle geometry: 10x10 cells per panel, panels laid out row-major.

use crate::config::LayoutConfig;

use super::grid::GridCell;

pub const COLUMNS: usize = 10;
pub const ROWS: usize = 10;
pub const GRID_CAPACITY: usize = COLUMNS * ROWS;
/// Side of one grid cell in pixels.
pub const CELL_SIZE: f64 = 20.0;
/// Scale applied to the person icon path so it fits in a cell.
pub const ICON_SCALE: f64 = 0.035;

/// Person glyph, drawn in a 192x512 box before scaling.
pub const ICON_PATH: &str = "M96 0c35.346 0 64 28.654 64 64s-28.654 64-64 64-64-28.654-64-64S60.654 0 96 0m48 144h-11.36c-22.711 10.443-49.59 10.894-73.28 0H48c-26.51 0-48 21.49-48 48v136c0 13.255 10.745 24 24 24h16v136c0 13.255 10.745 24 24 24h64c13.255 0 24-10.745 24-24V352h16c13.255 0 24-10.745 24-24V192c0-26.51-21.49-48-48-48z";

pub const CAPTION_NUMBER_SIZE: f64 = 42.0;
pub const CAPTION_TEXT_SIZE: f64 = 18.0;
/// Vertical gap between the caption number anchor and the caption text anchor.
pub const CAPTION_TEXT_GAP: f64 = 50.0;
/// Line pitch of the caption text.
pub const CAPTION_LINE_HEIGHT: f64 = 20.0;

/// Row and column of the cell at `index`. Index 0 is bottom-left, filling
/// left to right then upwards.
pub fn cell_position(index: usize) -> (usize, usize) {
    let row = (ROWS - 1).saturating_sub(index / COLUMNS);
    let column = index % COLUMNS;
    (row, column)
}

/// Top-left corner of a cell, relative to its panel.
pub fn cell_origin(cell: &GridCell) -> (f64, f64) {
    (cell.column as f64 * CELL_SIZE, cell.row as f64 * CELL_SIZE)
}

/// Top-left corner of the panel in slot `slot`, relative to the canvas.
pub fn panel_origin(layout: &LayoutConfig, slot: usize) -> (f64, f64) {
    let per_row = layout.panels_per_row.max(1);
    (
        layout.panel_width * (slot % per_row) as f64 + layout.panel_padding,
        layout.panel_height * (slot / per_row) as f64 + layout.panel_padding,
    )
}

/// Anchor of the caption number, horizontally centered under the grid.
pub fn caption_number_anchor() -> (f64, f64) {
    (COLUMNS as f64 / 2.0 * CELL_SIZE, ROWS as f64 * CELL_SIZE)
}

/// Anchor of the caption text block.
pub fn caption_text_anchor() -> (f64, f64) {
    let (x, y) = caption_number_anchor();
    (x, y + CAPTION_TEXT_GAP)
}

/// Baseline of caption line `line` relative to the caption text anchor.
pub fn caption_line_offset(line: usize) -> f64 {
    CAPTION_LINE_HEIGHT * (line + 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_position_bottom_left_first() {
        assert_eq!(cell_position(0), (9, 0));
        assert_eq!(cell_position(9), (9, 9));
        assert_eq!(cell_position(10), (8, 0));
        assert_eq!(cell_position(99), (0, 9));
    }

    #[test]
    fn test_panel_origin_three_per_row() {
        let layout = LayoutConfig::default();
        assert_eq!(panel_origin(&layout, 0), (20.0, 20.0));
        assert_eq!(panel_origin(&layout, 2), (500.0, 20.0));
        assert_eq!(panel_origin(&layout, 3), (20.0, 340.0));
        assert_eq!(panel_origin(&layout, 5), (500.0, 340.0));
    }

    #[test]
    fn test_caption_anchors() {
        assert_eq!(caption_number_anchor(), (100.0, 200.0));
        assert_eq!(caption_text_anchor(), (100.0, 250.0));
        assert_eq!(caption_line_offset(0), 20.0);
        assert_eq!(caption_line_offset(1), 40.0);
    }
}
