//! Terminal-style placement of code points on a character grid.
//!
//! Sizing the canvas and drawing onto it must walk the text with the very same
//! cursor, otherwise glyphs land outside the canvas. Both [`measure`] and
//! [`placements`] are driven by [`Cursor::advance`].
use tracing::warn;

use crate::glyph::{CellWidth, WidthClass};

/// Decoded input text, control characters included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
}

impl TextBuffer {
    /// Decode UTF-8; invalid or truncated sequences become U+FFFD.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from(String::from_utf8_lossy(bytes).as_ref())
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub ch: char,
    pub row: usize,
    pub col: usize,
    /// Cells covered starting at `col`.
    pub cell_width: CellWidth,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Draw a glyph here.
    Place(Placement),
    /// A control character moved the cursor.
    Moved,
    /// A control character without effect on the cursor.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
    tab_stop: usize,
}

impl Cursor {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            row: 0,
            col: 0,
            tab_stop: tab_stop.max(1),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    fn place(&self, ch: char, col: usize) -> Step {
        Step::Place(Placement {
            ch,
            row: self.row,
            col,
            cell_width: CellWidth::of(ch),
        })
    }

    pub fn advance(&mut self, ch: char) -> Step {
        match WidthClass::of(ch) {
            WidthClass::Single => {
                let step = self.place(ch, self.col);
                self.col = self.col.saturating_add(1);
                step
            }
            WidthClass::Double => {
                let step = self.place(ch, self.col);
                self.col = self.col.saturating_add(2);
                step
            }
            // stacks on the previous cell
            WidthClass::Zero => self.place(ch, self.col.saturating_sub(1)),
            WidthClass::Control => match ch {
                '\t' => {
                    self.col = (self.col / self.tab_stop + 1).saturating_mul(self.tab_stop);
                    Step::Moved
                }
                '\n' => {
                    self.row = self.row.saturating_add(1);
                    self.col = 0;
                    Step::Moved
                }
                // like xterm: next row, same column
                '\u{0B}' | '\u{0C}' => {
                    self.row = self.row.saturating_add(1);
                    Step::Moved
                }
                '\r' => {
                    self.col = 0;
                    Step::Moved
                }
                _ => Step::Ignored,
            },
        }
    }
}

/// Grid size needed to hold every placement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Extents {
    pub rows: usize,
    pub columns: usize,
}

/// Dry pass: the grid size `text` needs.
pub fn measure(text: &TextBuffer, tab_stop: usize) -> Extents {
    let mut cursor = Cursor::new(tab_stop);
    let mut extents = Extents::default();
    for &ch in text.chars() {
        match cursor.advance(ch) {
            Step::Place(p) => {
                extents.rows = extents.rows.max(p.row.saturating_add(1));
                extents.columns = extents.columns.max(p.col.saturating_add(p.cell_width.cells()));
            }
            Step::Moved => {}
            Step::Ignored => {
                warn!(
                    "ignoring width=-1 character U+{:04X} in row {}",
                    ch as u32,
                    cursor.row() + 1
                );
            }
        }
        extents.rows = extents.rows.max(cursor.row());
        extents.columns = extents.columns.max(cursor.col());
    }
    extents
}

/// Draw pass: every glyph placement in input order.
pub fn placements(text: &TextBuffer, tab_stop: usize) -> Placements<'_> {
    Placements {
        chars: text.chars().iter(),
        cursor: Cursor::new(tab_stop),
    }
}

pub struct Placements<'a> {
    chars: std::slice::Iter<'a, char>,
    cursor: Cursor,
}

impl Iterator for Placements<'_> {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        for &ch in self.chars.by_ref() {
            if let Step::Place(p) = self.cursor.advance(ch) {
                return Some(p);
            }
        }
        None
    }
}
