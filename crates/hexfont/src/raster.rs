use tracing::info;

use crate::{
    canvas::Canvas,
    error::{FontError, Result},
    font::Font,
    layout::{self, TextBuffer},
};

pub const DEFAULT_TAB_STOP: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterOptions {
    pub tab_stop: usize,
    /// Black glyphs on white instead of white on black.
    pub inverted: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            inverted: false,
        }
    }
}

/// Render `text` with `font` onto a canvas sized to fit it exactly.
pub fn rasterize(font: &Font, text: &TextBuffer, options: &RasterOptions) -> Result<Canvas> {
    let extents = layout::measure(text, options.tab_stop);
    info!(
        codepoints = text.len(),
        rows = extents.rows,
        columns = extents.columns,
        "measured text"
    );
    let mut canvas = Canvas::for_grid(
        &font.metrics,
        extents.columns,
        extents.rows,
        options.inverted,
    )
    .ok_or(FontError::CanvasTooLarge {
        columns: extents.columns,
        rows: extents.rows,
    })?;
    for p in layout::placements(text, options.tab_stop) {
        canvas.draw_glyph(&font.metrics, font.lookup(p.ch), p.row, p.col);
    }
    Ok(canvas)
}
