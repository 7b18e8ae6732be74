use unicode_width::UnicodeWidthChar;

/// Code point used for the fallback glyph.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Terminal display width of a code point, as `wcwidth` would classify it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidthClass {
    /// Control or non-printing (-1).
    Control,
    /// Combining marks and zero-width characters (0).
    Zero,
    /// Ordinary character (1).
    Single,
    /// East Asian wide or fullwidth character (2).
    Double,
}

impl WidthClass {
    pub fn of(ch: char) -> Self {
        if ch.is_control() {
            return WidthClass::Control;
        }
        match UnicodeWidthChar::width(ch) {
            None => WidthClass::Control,
            Some(0) => WidthClass::Zero,
            Some(1) => WidthClass::Single,
            Some(_) => WidthClass::Double,
        }
    }

    /// Classify a raw integer; values that are not scalar values count as control.
    pub fn of_codepoint(codepoint: u32) -> Self {
        char::from_u32(codepoint).map_or(WidthClass::Control, WidthClass::of)
    }

    pub fn as_i8(self) -> i8 {
        match self {
            WidthClass::Control => -1,
            WidthClass::Zero => 0,
            WidthClass::Single => 1,
            WidthClass::Double => 2,
        }
    }
}

/// Number of character cells a glyph occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellWidth {
    Single,
    Double,
}

impl CellWidth {
    /// Double for wide code points, single for everything else.
    pub fn of(ch: char) -> Self {
        match WidthClass::of(ch) {
            WidthClass::Double => CellWidth::Double,
            _ => CellWidth::Single,
        }
    }

    pub fn cells(self) -> usize {
        match self {
            CellWidth::Single => 1,
            CellWidth::Double => 2,
        }
    }
}

/// Global pixel dimensions of a monospace font. Both are non-zero, and every
/// size derived from them fits in a `usize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontMetrics {
    width: usize,
    height: usize,
}

impl FontMetrics {
    pub fn new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        // hex digits of a double-width glyph, the largest derived size
        width
            .checked_mul(2)?
            .div_ceil(8)
            .checked_mul(height)?
            .checked_mul(2)?;
        Some(Self { width, height })
    }

    /// Width of a single cell in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels in one bitmap row of a glyph with the given cell width.
    pub fn pixels(&self, cell_width: CellWidth) -> usize {
        cell_width.cells() * self.width
    }

    /// Packed bytes in one bitmap row; unused low bits of the last byte are zero.
    pub fn row_bytes(&self, cell_width: CellWidth) -> usize {
        self.pixels(cell_width).div_ceil(8)
    }

    /// Total bitmap length of a glyph with the given cell width.
    pub fn glyph_bytes(&self, cell_width: CellWidth) -> usize {
        self.height * self.row_bytes(cell_width)
    }

    /// Hex digits a table record carries for a glyph with the given cell width.
    pub fn hex_digits(&self, cell_width: CellWidth) -> usize {
        2 * self.glyph_bytes(cell_width)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub codepoint: char,
    pub cell_width: CellWidth,
    /// Row-major packed bits, bit 7 of each byte is the leftmost pixel.
    pub bitmap: Vec<u8>,
}

impl Glyph {
    pub fn new(codepoint: char, bitmap: Vec<u8>) -> Self {
        Self {
            codepoint,
            cell_width: CellWidth::of(codepoint),
            bitmap,
        }
    }

    /// A one-cell 50% shade made of vertical one pixel bars. Works for any font size.
    ///
    /// Unlike decoded glyphs its row padding bits are set as well. Nothing reads
    /// past `pixels()` and the glyph is never written out, so the length is all
    /// that has to hold.
    pub fn checkerboard(metrics: &FontMetrics) -> Self {
        Self {
            codepoint: REPLACEMENT_CHAR,
            cell_width: CellWidth::Single,
            bitmap: vec![0xAA; metrics.glyph_bytes(CellWidth::Single)],
        }
    }

    pub fn rows<'a>(&'a self, metrics: &FontMetrics) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.bitmap.chunks(metrics.row_bytes(self.cell_width))
    }

    /// Pixels outside the bitmap read as unset.
    pub fn pixel(&self, metrics: &FontMetrics, x: usize, y: usize) -> bool {
        self.bitmap
            .get(y * metrics.row_bytes(self.cell_width) + x / 8)
            .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
    }
}
