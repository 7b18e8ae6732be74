use crate::glyph::{FontMetrics, Glyph};

/// Packed 1 bit per pixel frame buffer, row-major, MSB is the leftmost pixel.
///
/// Normally a glyph pixel is a set bit on a cleared background; an inverted
/// canvas starts all ones and glyph pixels clear their bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    stride: usize,
    inverted: bool,
    data: Vec<u8>,
}

impl Canvas {
    /// `None` when the buffer cannot be allocated.
    pub fn new(width: usize, height: usize, inverted: bool) -> Option<Self> {
        let stride = width.div_ceil(8);
        let len = stride.checked_mul(height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).ok()?;
        data.resize(len, if inverted { 0xFF } else { 0x00 });
        Some(Self {
            width,
            height,
            stride,
            inverted,
            data,
        })
    }

    /// A canvas holding `columns` by `rows` character cells.
    pub fn for_grid(
        metrics: &FontMetrics,
        columns: usize,
        rows: usize,
        inverted: bool,
    ) -> Option<Self> {
        let width = metrics.width().checked_mul(columns)?;
        let height = metrics.height().checked_mul(rows)?;
        Self::new(width, height, inverted)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per scanline.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// All scanlines back to back.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn scanlines(&self) -> std::slice::Chunks<'_, u8> {
        self.data.chunks(self.stride.max(1))
    }

    /// Mark pixel (x, y) as glyph ink. Coordinates must lie inside the canvas.
    pub fn set_pixel(&mut self, x: usize, y: usize) {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside canvas");
        let mask = 0x80u8 >> (x % 8);
        let byte = &mut self.data[y * self.stride + x / 8];
        if self.inverted {
            *byte &= !mask;
        } else {
            *byte |= mask;
        }
    }

    /// Whether pixel (x, y) carries glyph ink, independent of polarity.
    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        let set = self.data[y * self.stride + x / 8] & (0x80 >> (x % 8)) != 0;
        set != self.inverted
    }

    /// Plot `glyph` with its top left corner at character cell (`row`, `col`).
    pub fn draw_glyph(&mut self, metrics: &FontMetrics, glyph: &Glyph, row: usize, col: usize) {
        let x0 = metrics.width() * col;
        let y0 = metrics.height() * row;
        let pixels = metrics.pixels(glyph.cell_width);
        for dy in 0..metrics.height() {
            for dx in 0..pixels {
                if glyph.pixel(metrics, dx, dy) {
                    self.set_pixel(x0 + dx, y0 + dy);
                }
            }
        }
    }
}
