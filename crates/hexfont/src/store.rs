use crate::{
    error::{FontError, Result},
    glyph::{FontMetrics, Glyph, REPLACEMENT_CHAR},
};

/// Immutable set of glyphs sorted by code point.
///
/// Lookups never fail: a code point the font does not define resolves to the
/// replacement glyph, which is the font's own U+FFFD when present and a
/// synthesized checkerboard otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphStore {
    glyphs: Vec<Glyph>,
    replacement: Glyph,
}

impl GlyphStore {
    /// Build a store from glyphs in any order. When a code point occurs more
    /// than once the first occurrence is kept.
    ///
    /// Every bitmap must hold exactly `metrics.glyph_bytes(cell_width)` bytes.
    pub fn new(metrics: &FontMetrics, mut glyphs: Vec<Glyph>) -> Result<Self> {
        for glyph in &glyphs {
            let expected = metrics.glyph_bytes(glyph.cell_width);
            if glyph.bitmap.len() != expected {
                return Err(FontError::BitmapLength {
                    codepoint: glyph.codepoint as u32,
                    expected,
                    actual: glyph.bitmap.len(),
                });
            }
        }
        glyphs.sort_by_key(|g| g.codepoint);
        glyphs.dedup_by_key(|g| g.codepoint);
        let replacement = match glyphs.binary_search_by_key(&REPLACEMENT_CHAR, |g| g.codepoint) {
            Ok(idx) => glyphs[idx].clone(),
            Err(_) => Glyph::checkerboard(metrics),
        };
        Ok(Self {
            glyphs,
            replacement,
        })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.get(ch).is_some()
    }

    /// The glyph defined for `ch`, if the font has one.
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .binary_search_by_key(&ch, |g| g.codepoint)
            .ok()
            .map(|idx| &self.glyphs[idx])
    }

    /// The glyph for `ch`, falling back to the replacement glyph.
    pub fn lookup(&self, ch: char) -> &Glyph {
        self.get(ch).unwrap_or(&self.replacement)
    }

    pub fn replacement(&self) -> &Glyph {
        &self.replacement
    }

    /// Defined glyphs in ascending code point order. A synthesized replacement is not included.
    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.glyphs.iter()
    }
}

impl<'a> IntoIterator for &'a GlyphStore {
    type Item = &'a Glyph;
    type IntoIter = std::slice::Iter<'a, Glyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
