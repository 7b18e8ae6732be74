//! Src documents: glyphs drawn as ASCII art for hand editing.
//!
//! ```text
//! STARTCHAR U+0041 LATIN CAPITAL LETTER A
//! 01 | ██ |
//! 00 |█  █|
//! ENDCHAR
//! ```
//!
//! Glyphs appear in strictly ascending code point order. A set pixel is
//! U+2588 FULL BLOCK, an unset pixel is a space.
use std::collections::BTreeSet;
use std::fmt::Write;

use tracing::debug;

use crate::{
    error::{FontError, Result},
    font::Font,
    glyph::{CellWidth, FontMetrics, Glyph},
    hex::DecodeOptions,
    names::CharNames,
    store::GlyphStore,
};

pub const FULL_BLOCK: char = '\u{2588}';

const STARTCHAR: &str = "STARTCHAR U+";
const ENDCHAR: &str = "ENDCHAR";

pub fn encode<W: Write>(
    out: &mut W,
    metrics: &FontMetrics,
    glyphs: &GlyphStore,
    names: &dyn CharNames,
) -> Result<()> {
    for glyph in glyphs {
        write_glyph(out, metrics, glyph, names)?;
    }
    Ok(())
}

pub fn to_string(metrics: &FontMetrics, glyphs: &GlyphStore, names: &dyn CharNames) -> Result<String> {
    let mut out = String::new();
    encode(&mut out, metrics, glyphs, names)?;
    Ok(out)
}

fn write_glyph<W: Write>(
    out: &mut W,
    metrics: &FontMetrics,
    glyph: &Glyph,
    names: &dyn CharNames,
) -> Result<()> {
    writeln!(
        out,
        "{STARTCHAR}{:04x} {}",
        glyph.codepoint as u32,
        names.name_or_marker(glyph.codepoint)
    )?;
    let pixels = metrics.pixels(glyph.cell_width);
    for y in 0..metrics.height() {
        write!(out, "{:02} |", metrics.height() - 1 - y)?;
        for x in 0..pixels {
            let set = glyph.pixel(metrics, x, y);
            out.write_char(if set { FULL_BLOCK } else { ' ' })?;
        }
        writeln!(out, "|")?;
    }
    writeln!(out, "{ENDCHAR}")?;
    Ok(())
}

/// A glyph whose bitmap rows are still being read.
struct Pending {
    codepoint: char,
    cell_width: CellWidth,
    bitmap: Vec<u8>,
    rows: usize,
}

impl Pending {
    fn new(codepoint: char) -> Self {
        Self {
            codepoint,
            cell_width: CellWidth::of(codepoint),
            bitmap: Vec::new(),
            rows: 0,
        }
    }

    fn finish(self) -> Glyph {
        Glyph {
            codepoint: self.codepoint,
            cell_width: self.cell_width,
            bitmap: self.bitmap,
        }
    }
}

enum Expect {
    Start,
    BitmapRow(Pending),
    End(Glyph),
}

/// Parse a src document. Src carries no dimensions, so the caller supplies them.
pub fn decode(text: &str, metrics: FontMetrics, options: &DecodeOptions) -> Result<Font> {
    let mut glyphs = Vec::new();
    let mut seen = BTreeSet::new();
    let mut expect = Expect::Start;
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        expect = match expect {
            Expect::Start => {
                let codepoint = parse_startchar(line_no, line)?;
                check_order(line_no, codepoint, &seen)?;
                if glyphs.len() == options.max_glyphs {
                    return Err(FontError::ResourceExhausted {
                        line: line_no,
                        limit: options.max_glyphs,
                    });
                }
                seen.insert(codepoint);
                Expect::BitmapRow(Pending::new(codepoint))
            }
            Expect::BitmapRow(mut pending) => {
                parse_row(line_no, line, &mut pending, &metrics)?;
                if pending.rows == metrics.height() {
                    Expect::End(pending.finish())
                } else {
                    Expect::BitmapRow(pending)
                }
            }
            Expect::End(glyph) => {
                if line != ENDCHAR {
                    return Err(FontError::UnexpectedLine {
                        line: line_no,
                        expected: "'ENDCHAR'",
                        found: line.to_string(),
                    });
                }
                glyphs.push(glyph);
                Expect::Start
            }
        };
    }

    match expect {
        Expect::Start => {}
        Expect::BitmapRow(Pending { codepoint, .. }) | Expect::End(Glyph { codepoint, .. }) => {
            return Err(FontError::TruncatedInput {
                line: last_line,
                codepoint: codepoint as u32,
            });
        }
    }
    if glyphs.len() < options.min_glyphs {
        return Err(FontError::EmptyFont {
            found: glyphs.len(),
            required: options.min_glyphs,
        });
    }
    debug!(glyphs = glyphs.len(), "decoded src document");
    Ok(Font::new(metrics, GlyphStore::new(&metrics, glyphs)?))
}

fn parse_startchar(line: usize, text: &str) -> Result<char> {
    let unexpected = || FontError::UnexpectedLine {
        line,
        expected: "'STARTCHAR U+xxxx'",
        found: text.to_string(),
    };
    let rest = text.strip_prefix(STARTCHAR).ok_or_else(unexpected)?;
    let end = rest
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(end);
    if digits.is_empty() || digits.len() > 8 || !(tail.is_empty() || tail.starts_with(char::is_whitespace)) {
        return Err(unexpected());
    }
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(unexpected)
}

fn check_order(line: usize, codepoint: char, seen: &BTreeSet<char>) -> Result<()> {
    if seen.contains(&codepoint) {
        return Err(FontError::DuplicateGlyph {
            line,
            codepoint: codepoint as u32,
        });
    }
    if let Some(&previous) = seen.last() {
        if codepoint < previous {
            return Err(FontError::UnsortedInput {
                line,
                codepoint: codepoint as u32,
                previous: previous as u32,
            });
        }
    }
    Ok(())
}

fn parse_row(line: usize, text: &str, pending: &mut Pending, metrics: &FontMetrics) -> Result<()> {
    let mut pieces = text.split('|');
    let (Some(_counter), Some(span), Some(tail), None) =
        (pieces.next(), pieces.next(), pieces.next(), pieces.next())
    else {
        return Err(FontError::UnexpectedLine {
            line,
            expected: "bitmap row 'NN |pixels|'",
            found: text.to_string(),
        });
    };
    if !tail.trim().is_empty() {
        return Err(FontError::UnexpectedLine {
            line,
            expected: "nothing after the final '|'",
            found: text.to_string(),
        });
    }

    let expected = metrics.pixels(pending.cell_width);
    let actual = span.chars().count();
    if actual != expected {
        return Err(FontError::PixelCountMismatch {
            line,
            codepoint: pending.codepoint as u32,
            expected,
            actual,
        });
    }

    let mut row = vec![0u8; metrics.row_bytes(pending.cell_width)];
    for (x, ch) in span.chars().enumerate() {
        match ch {
            FULL_BLOCK => row[x / 8] |= 0x80 >> (x % 8),
            ' ' => {}
            other => {
                return Err(FontError::InvalidPixelGlyph {
                    line,
                    codepoint: pending.codepoint as u32,
                    found: other,
                })
            }
        }
    }
    pending.bitmap.extend_from_slice(&row);
    pending.rows += 1;
    Ok(())
}
