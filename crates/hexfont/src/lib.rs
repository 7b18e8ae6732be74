//! hexfont: monospace bitmap font toolkit.
//! Hex font tables, their src (ASCII art) and BDF renditions, and text rasterization.

pub mod bdf;
pub mod canvas;
mod error;
mod font;
mod glyph;
pub mod hex;
pub mod layout;
pub mod names;
pub mod raster;
pub mod src;
mod store;

pub use bdf::BdfProperties;
pub use canvas::Canvas;
pub use error::{FontError, Result};
pub use font::Font;
pub use glyph::{CellWidth, FontMetrics, Glyph, WidthClass, REPLACEMENT_CHAR};
pub use hex::{DecodeMode, DecodeOptions};
pub use layout::{Placement, TextBuffer};
pub use raster::{rasterize, RasterOptions};
pub use store::GlyphStore;

// Test utilities
pub mod test_support;
