//! BDF 2.1 output.
//!
//! The property set is fixed per font family and is not derived from the
//! bitmaps. [`BdfProperties::default`] describes Sun Gallant; another family
//! needs its own record.
use std::fmt::{self, Write};

use tracing::warn;

use crate::{
    error::Result,
    glyph::{CellWidth, FontMetrics, Glyph},
    hex::write_hex_bytes,
    store::GlyphStore,
};

/// Per-glyph metric lines for one cell width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMetrics {
    pub swidth: u32,
    pub dwidth: u32,
    pub bbx_width: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BdfProperties {
    pub fontname_registry: String,
    pub foundry: String,
    pub family_name: String,
    pub weight_name: String,
    pub slant: String,
    pub setwidth_name: String,
    pub add_style_name: String,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub spacing: String,
    pub average_width: u32,
    pub charset_registry: String,
    pub charset_encoding: String,
    pub font_ascent: u32,
    pub font_descent: u32,
    pub default_char: u32,
    pub narrow: CellMetrics,
    pub wide: CellMetrics,
}

impl Default for BdfProperties {
    fn default() -> Self {
        Self {
            fontname_registry: String::new(),
            foundry: "Sun".into(),
            family_name: "Gallant".into(),
            weight_name: "Medium".into(),
            slant: "R".into(),
            setwidth_name: "Normal".into(),
            add_style_name: String::new(),
            resolution_x: 75,
            resolution_y: 75,
            spacing: "C".into(),
            average_width: 120,
            charset_registry: "ISO10646".into(),
            charset_encoding: "1".into(),
            font_ascent: 17,
            font_descent: 5,
            default_char: 0xFFFD,
            narrow: CellMetrics {
                swidth: 500,
                dwidth: 12,
                bbx_width: 12,
                x_offset: 0,
                y_offset: -5,
            },
            wide: CellMetrics {
                swidth: 1000,
                dwidth: 24,
                bbx_width: 24,
                x_offset: 0,
                y_offset: -5,
            },
        }
    }
}

enum Value<'a> {
    Str(&'a str),
    Int(u32),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Int(n) => write!(f, "{n}"),
        }
    }
}

impl BdfProperties {
    pub fn cell(&self, cell_width: CellWidth) -> &CellMetrics {
        match cell_width {
            CellWidth::Single => &self.narrow,
            CellWidth::Double => &self.wide,
        }
    }

    fn point_size(height: usize) -> usize {
        10 * height
    }

    /// X logical font description name.
    pub fn xlfd(&self, height: usize) -> String {
        format!(
            "-{}-{}-{}-{}-{}-{}-{}-{}-{}-{}-{}-{}-{}-{}",
            self.foundry.to_lowercase(),
            self.family_name.to_lowercase(),
            self.weight_name.to_lowercase(),
            self.slant.to_lowercase(),
            self.setwidth_name.to_lowercase(),
            self.add_style_name,
            height,
            Self::point_size(height),
            self.resolution_x,
            self.resolution_y,
            self.spacing,
            self.average_width,
            self.charset_registry,
            self.charset_encoding,
        )
    }

    fn properties(&self, height: usize) -> Vec<(&'static str, Value<'_>)> {
        let point_size = Self::point_size(height) as u32;
        let height = height as u32;
        vec![
            ("FONTNAME_REGISTRY", Value::Str(&self.fontname_registry)),
            ("FOUNDRY", Value::Str(&self.foundry)),
            ("FAMILY_NAME", Value::Str(&self.family_name)),
            ("WEIGHT_NAME", Value::Str(&self.weight_name)),
            ("SLANT", Value::Str(&self.slant)),
            ("SETWIDTH_NAME", Value::Str(&self.setwidth_name)),
            ("ADD_STYLE_NAME", Value::Str(&self.add_style_name)),
            ("PIXEL_SIZE", Value::Int(height)),
            ("POINT_SIZE", Value::Int(point_size)),
            ("RESOLUTION_X", Value::Int(self.resolution_x)),
            ("RESOLUTION_Y", Value::Int(self.resolution_y)),
            ("SPACING", Value::Str(&self.spacing)),
            ("AVERAGE_WIDTH", Value::Int(self.average_width)),
            ("CHARSET_REGISTRY", Value::Str(&self.charset_registry)),
            ("CHARSET_ENCODING", Value::Str(&self.charset_encoding)),
            ("FONT_ASCENT", Value::Int(self.font_ascent)),
            ("FONT_DESCENT", Value::Int(self.font_descent)),
            ("DEFAULT_CHAR", Value::Int(self.default_char)),
        ]
    }
}

pub fn encode<W: Write>(
    out: &mut W,
    metrics: &FontMetrics,
    glyphs: &GlyphStore,
    properties: &BdfProperties,
) -> Result<()> {
    if properties.narrow.bbx_width as usize != metrics.width() {
        warn!(
            font_width = metrics.width(),
            bbx_width = properties.narrow.bbx_width,
            "BDF properties were made for a different font width"
        );
    }
    write_preamble(out, metrics, glyphs.len(), properties)?;
    for glyph in glyphs {
        write_glyph(out, metrics, glyph, properties)?;
    }
    writeln!(out, "ENDFONT")?;
    Ok(())
}

pub fn to_string(
    metrics: &FontMetrics,
    glyphs: &GlyphStore,
    properties: &BdfProperties,
) -> Result<String> {
    let mut out = String::new();
    encode(&mut out, metrics, glyphs, properties)?;
    Ok(out)
}

fn write_preamble<W: Write>(
    out: &mut W,
    metrics: &FontMetrics,
    chars: usize,
    properties: &BdfProperties,
) -> Result<()> {
    let height = metrics.height();
    let narrow = &properties.narrow;
    writeln!(out, "STARTFONT 2.1")?;
    writeln!(out, "FONT {}", properties.xlfd(height))?;
    writeln!(
        out,
        "SIZE {} {} {}",
        height, properties.resolution_x, properties.resolution_y
    )?;
    writeln!(
        out,
        "FONTBOUNDINGBOX {} {} {} {}",
        narrow.bbx_width, height, narrow.x_offset, narrow.y_offset
    )?;
    let props = properties.properties(height);
    writeln!(out, "STARTPROPERTIES {}", props.len())?;
    for (key, value) in &props {
        writeln!(out, "{key} {value}")?;
    }
    writeln!(out, "ENDPROPERTIES")?;
    writeln!(out, "CHARS {chars}")?;
    Ok(())
}

fn write_glyph<W: Write>(
    out: &mut W,
    metrics: &FontMetrics,
    glyph: &Glyph,
    properties: &BdfProperties,
) -> Result<()> {
    let codepoint = glyph.codepoint as u32;
    let cell = properties.cell(glyph.cell_width);
    writeln!(out, "STARTCHAR U{codepoint:04x}")?;
    writeln!(out, "ENCODING {codepoint}")?;
    writeln!(out, "SWIDTH {} 0", cell.swidth)?;
    writeln!(out, "DWIDTH {} 0", cell.dwidth)?;
    writeln!(
        out,
        "BBX {} {} {} {}",
        cell.bbx_width,
        metrics.height(),
        cell.x_offset,
        cell.y_offset
    )?;
    writeln!(out, "BITMAP")?;
    for row in glyph.rows(metrics) {
        write_hex_bytes(out, row)?;
        writeln!(out)?;
    }
    writeln!(out, "ENDCHAR")?;
    Ok(())
}
