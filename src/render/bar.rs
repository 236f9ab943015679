//! Progress-bar rendering with sub-character resolution.
//!
//! A cell is an eighth-resolution column: full cells are solid blocks, the
//! boundary cell uses one of seven partial-fill glyphs, and the rest are
//! light shade. A background fill runs under the whole bar so the empty
//! portion stays visually joined to the filled one; the only reset is the
//! final one.

use crate::config::schema::ColorMode;
use crate::render::palette::{
    self, BG_BAR, FG_BLUE, FG_EMPTY, FG_GRAY, FG_GREEN, FG_ORANGE, FG_RED, FG_YELLOW,
};

/// Partial-fill glyphs, lightest (one eighth) to heaviest (seven eighths).
/// Index 0 is the "no partial cell" level.
const PARTIAL_BLOCKS: [&str; 8] = ["", "\u{258F}", "\u{258E}", "\u{258D}", "\u{258C}", "\u{258B}", "\u{258A}", "\u{2589}"];

const FULL_BLOCK: &str = "\u{2588}";
const EMPTY_BLOCK: &str = "\u{2591}";

/// Render a `length`-cell bar for `percentage`.
///
/// Callers are expected to pass 0-100, but out-of-range input degrades
/// instead of panicking: negative progress draws no filled cells, and
/// overshoot clamps the empty-cell count at zero.
pub fn render_bar(percentage: f64, length: usize, color_mode: ColorMode) -> String {
    let progress = (percentage / 100.0) * length as f64;

    let (full_cells, partial) = if progress <= 0.0 {
        (0, "")
    } else {
        let full = progress.floor() as usize;
        let remainder = progress - progress.floor();
        let level = (remainder * 8.0).floor() as usize;
        (full, PARTIAL_BLOCKS[level.min(7)])
    };

    // usedCells must reflect exactly what gets drawn: a remainder that
    // quantizes to level 0 contributes no partial glyph and must not be
    // double-counted against the empty cells.
    let used_cells = full_cells + usize::from(!partial.is_empty());
    let empty_cells = length.saturating_sub(used_cells);

    let fg = fill_color(percentage, color_mode);

    let mut bar = palette::StyleBuilder::new().style(BG_BAR);
    if full_cells > 0 || !partial.is_empty() {
        bar = bar
            .style(fg)
            .text(FULL_BLOCK.repeat(full_cells))
            .text(partial);
    }
    if empty_cells > 0 {
        bar = bar.style(FG_EMPTY).text(EMPTY_BLOCK.repeat(empty_cells));
    }
    bar.neutral().build()
}

/// Foreground color for the filled portion.
///
/// Progressive mode escalates by the raw input percentage, not by the
/// cell-scaled progress value.
fn fill_color(percentage: f64, color_mode: ColorMode) -> &'static str {
    match color_mode {
        ColorMode::Progressive => {
            if percentage < 50.0 {
                FG_GRAY
            } else if percentage < 70.0 {
                FG_YELLOW
            } else if percentage < 90.0 {
                FG_ORANGE
            } else {
                FG_RED
            }
        }
        ColorMode::Green => FG_GREEN,
        ColorMode::Yellow => FG_YELLOW,
        ColorMode::Red => FG_RED,
        ColorMode::Blue => FG_BLUE,
    }
}
