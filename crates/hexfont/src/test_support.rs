//! Test support utilities for hexfont.
//!
//! Small fixture fonts and helpers to inspect rendered canvases. Not part of
//! the stable API.

use crate::{
    canvas::Canvas,
    error::Result,
    font::Font,
    hex::{self, DecodeOptions},
};

/// A 5x2 font with two letters, a combining acute accent and one wide ideograph.
///
/// Narrow glyphs take one byte per row, the wide one two, so the two cell
/// widths need different record lengths.
pub const TINY_HEX: &str = "\
# Width: 5
# Height: 2
0041:f888
0042:f0f0
0301:2000
4e2d:ffc08040
";

pub fn tiny_font() -> Result<Font> {
    hex::decode(TINY_HEX, &DecodeOptions::strict())
}

/// One string per scanline, `#` for glyph ink and `.` for background.
pub fn ink_rows(canvas: &Canvas) -> Vec<String> {
    (0..canvas.height())
        .map(|y| {
            (0..canvas.width())
                .map(|x| if canvas.is_ink(x, y) { '#' } else { '.' })
                .collect()
        })
        .collect()
}
