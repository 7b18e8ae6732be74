//! Hex font tables.
//!
//! Two directives, `# Width: <n>` and `# Height: <n>` in either order, followed
//! by `#` comments and `codepoint:hexdata` records, one per line.
use std::collections::BTreeSet;
use std::fmt::Write;

use tracing::{debug, warn};

use crate::{
    error::{FontError, Result},
    font::Font,
    glyph::{CellWidth, FontMetrics, Glyph},
    store::GlyphStore,
};

/// Glyph ceiling for the converters.
pub const STRICT_MAX_GLYPHS: usize = 131_072;
/// Glyph ceiling for the rasterizer's font loader.
pub const LENIENT_MAX_GLYPHS: usize = 65_536;

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub enum DecodeMode {
    /// Any line that is not a comment or a record aborts decoding.
    #[default]
    Strict,
    /// Lines that do not scan as records are skipped with a warning.
    Lenient,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
    pub max_glyphs: usize,
    pub min_glyphs: usize,
}

impl DecodeOptions {
    /// Settings for hand-authored tables fed to the converters.
    pub fn strict() -> Self {
        Self {
            mode: DecodeMode::Strict,
            max_glyphs: STRICT_MAX_GLYPHS,
            min_glyphs: 1,
        }
    }

    /// Settings for externally sourced fonts loaded for rasterization.
    pub fn lenient() -> Self {
        Self {
            mode: DecodeMode::Lenient,
            max_glyphs: LENIENT_MAX_GLYPHS,
            min_glyphs: 2,
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Parse a hex font table.
pub fn decode(text: &str, options: &DecodeOptions) -> Result<Font> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end()));
    let metrics = parse_dimensions(&mut lines)?;

    let mut glyphs = Vec::new();
    let mut seen = BTreeSet::new();
    for (line_no, line) in lines {
        if line.is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let (codepoint, data) = match split_record(line) {
            Ok(record) => record,
            Err(reason) => match options.mode {
                DecodeMode::Strict => {
                    return Err(FontError::MalformedRecord {
                        line: line_no,
                        reason,
                    })
                }
                DecodeMode::Lenient => {
                    warn!(line = line_no, "skipping line, does not scan: {reason}");
                    continue;
                }
            },
        };
        if glyphs.len() == options.max_glyphs {
            return Err(FontError::ResourceExhausted {
                line: line_no,
                limit: options.max_glyphs,
            });
        }
        let glyph = parse_bitmap(line_no, codepoint, data, &metrics)?;
        if !seen.insert(codepoint) {
            match options.mode {
                DecodeMode::Strict => {
                    return Err(FontError::DuplicateGlyph {
                        line: line_no,
                        codepoint: codepoint as u32,
                    })
                }
                DecodeMode::Lenient => {
                    warn!(line = line_no, "skipping duplicate glyph U+{:04X}", codepoint as u32);
                    continue;
                }
            }
        }
        glyphs.push(glyph);
    }

    if glyphs.len() < options.min_glyphs {
        return Err(FontError::EmptyFont {
            found: glyphs.len(),
            required: options.min_glyphs,
        });
    }
    debug!(
        glyphs = glyphs.len(),
        width = metrics.width(),
        height = metrics.height(),
        "decoded hex font"
    );
    Ok(Font::new(metrics, GlyphStore::new(&metrics, glyphs)?))
}

/// Write the table for `glyphs`: both directives, then one record per glyph.
pub fn encode<W: Write>(out: &mut W, metrics: &FontMetrics, glyphs: &GlyphStore) -> Result<()> {
    write_dimensions(out, metrics)?;
    for glyph in glyphs {
        write_record(out, glyph)?;
    }
    Ok(())
}

pub fn to_string(metrics: &FontMetrics, glyphs: &GlyphStore) -> Result<String> {
    let mut out = String::new();
    encode(&mut out, metrics, glyphs)?;
    Ok(out)
}

pub(crate) fn write_dimensions<W: Write>(out: &mut W, metrics: &FontMetrics) -> Result<()> {
    writeln!(out, "# Width: {}", metrics.width())?;
    writeln!(out, "# Height: {}", metrics.height())?;
    Ok(())
}

pub(crate) fn write_record<W: Write>(out: &mut W, glyph: &Glyph) -> Result<()> {
    write!(out, "{:04x}:", glyph.codepoint as u32)?;
    write_hex_bytes(out, &glyph.bitmap)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_hex_bytes<W: Write>(out: &mut W, bytes: &[u8]) -> Result<()> {
    for byte in bytes {
        write!(out, "{byte:02x}")?;
    }
    Ok(())
}

fn parse_dimensions<'a, I>(lines: &mut I) -> Result<FontMetrics>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut width = None;
    let mut height = None;
    let mut last_line = 0;
    for _ in 0..2 {
        let Some((line_no, line)) = lines.find(|(_, line)| !line.is_empty()) else {
            return Err(FontError::MalformedHeader {
                line: last_line + 1,
                reason: "could not read '# Width or Height: number' directive".into(),
            });
        };
        last_line = line_no;
        if let Some(w) = directive(line, "Width:") {
            width = Some(w);
        } else if let Some(h) = directive(line, "Height:") {
            height = Some(h);
        } else {
            return Err(FontError::MalformedHeader {
                line: line_no,
                reason: "line must be '# Width or Height: number'".into(),
            });
        }
    }
    let (Some(width), Some(height)) = (width, height) else {
        return Err(FontError::MalformedHeader {
            line: last_line,
            reason: "need both a '# Width' and a '# Height' directive".into(),
        });
    };
    FontMetrics::new(width, height).ok_or_else(|| FontError::MalformedHeader {
        line: last_line,
        reason: format!("width {width} and height {height} must both be positive"),
    })
}

fn directive(line: &str, key: &str) -> Option<usize> {
    line.trim()
        .strip_prefix('#')?
        .trim_start()
        .strip_prefix(key)?
        .trim()
        .parse()
        .ok()
}

fn split_record(line: &str) -> std::result::Result<(char, &str), String> {
    let (key, data) = line
        .split_once(':')
        .ok_or_else(|| "no ':' separator".to_string())?;
    if key.is_empty() || key.len() > 8 || !key.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid codepoint '{key}'"));
    }
    let value = u32::from_str_radix(key, 16).map_err(|e| format!("invalid codepoint '{key}': {e}"))?;
    let ch = char::from_u32(value)
        .ok_or_else(|| format!("U+{value:04X} is not a Unicode scalar value"))?;
    Ok((ch, data.trim()))
}

fn parse_bitmap(line: usize, codepoint: char, data: &str, metrics: &FontMetrics) -> Result<Glyph> {
    let cell_width = CellWidth::of(codepoint);
    let expected = metrics.hex_digits(cell_width);
    let actual = data.chars().count();
    if actual != expected {
        return Err(FontError::GlyphLengthMismatch {
            line,
            codepoint: codepoint as u32,
            expected,
            actual,
        });
    }
    let bitmap = decode_hex_bytes(data).ok_or_else(|| FontError::MalformedRecord {
        line,
        reason: format!("invalid hex digit in bitmap of U+{:04X}", codepoint as u32),
    })?;
    Ok(Glyph {
        codepoint,
        cell_width,
        bitmap,
    })
}

fn decode_hex_bytes(data: &str) -> Option<Vec<u8>> {
    data.as_bytes()
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (*pair.get(1)? as char).to_digit(16)?;
            Some((hi << 4 | lo) as u8)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_in_either_order() {
        let mut lines = vec![(1, "# Height: 22"), (2, ""), (3, "#Width:12")].into_iter();
        let m = parse_dimensions(&mut lines).unwrap();
        assert_eq!((m.width(), m.height()), (12, 22));
    }

    #[test]
    fn two_width_directives_are_rejected() {
        let mut lines = vec![(1, "# Width: 8"), (2, "# Width: 8")].into_iter();
        assert!(matches!(
            parse_dimensions(&mut lines),
            Err(FontError::MalformedHeader { line: 2, .. })
        ));
    }

    #[test]
    fn record_shape() {
        assert_eq!(split_record("0041:80").unwrap(), ('A', "80"));
        assert!(split_record("zz:80").is_err());
        assert!(split_record("d800:80").is_err());
        assert!(split_record("0041 80").is_err());
    }

    #[test]
    fn hex_bytes() {
        assert_eq!(decode_hex_bytes("0aFf"), Some(vec![0x0A, 0xFF]));
        assert_eq!(decode_hex_bytes("0g"), None);
    }
}
