use std::io::Read;
use std::{fs, path::Path};

use crate::{
    bdf::{self, BdfProperties},
    error::{FontError, Result},
    glyph::{FontMetrics, Glyph},
    hex::{self, DecodeOptions},
    names::CharNames,
    src,
    store::GlyphStore,
};

/// A decoded font: its metrics plus the glyphs, passed together to every consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Font {
    pub metrics: FontMetrics,
    pub glyphs: GlyphStore,
}

impl Font {
    pub fn new(metrics: FontMetrics, glyphs: GlyphStore) -> Self {
        Self { metrics, glyphs }
    }

    pub fn load(path: &Path, options: &DecodeOptions) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes, options)
    }

    pub fn read<R: Read>(mut reader: R, options: &DecodeOptions) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf, options)
    }

    /// Decode a hex table, or a zip archive holding one (first `*.hex` entry).
    pub fn from_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        if bytes.len() >= 4 && &bytes[0..4] == b"PK\x03\x04" {
            let content = read_archive(bytes)?;
            return hex::decode(&content, options);
        }
        let content = std::str::from_utf8(bytes)?;
        hex::decode(content, options)
    }

    pub fn lookup(&self, ch: char) -> &Glyph {
        self.glyphs.lookup(ch)
    }

    pub fn to_hex(&self) -> Result<String> {
        hex::to_string(&self.metrics, &self.glyphs)
    }

    pub fn to_src(&self, names: &dyn CharNames) -> Result<String> {
        src::to_string(&self.metrics, &self.glyphs, names)
    }

    pub fn to_bdf(&self, properties: &BdfProperties) -> Result<String> {
        bdf::to_string(&self.metrics, &self.glyphs, properties)
    }
}

#[cfg(feature = "archive")]
fn read_archive(bytes: &[u8]) -> Result<String> {
    use std::io::Cursor;
    use zip::ZipArchive;

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| FontError::Archive(format!("zip open error: {e}")))?;
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| FontError::Archive(format!("zip entry error: {e}")))?;
        if file.name().ends_with(".hex") {
            let mut buf = String::new();
            file.read_to_string(&mut buf)?;
            return Ok(buf);
        }
    }
    Err(FontError::Archive("zip archive contained no .hex".into()))
}

#[cfg(not(feature = "archive"))]
fn read_archive(_bytes: &[u8]) -> Result<String> {
    Err(FontError::Archive(
        "zipped fonts need the 'archive' feature".into(),
    ))
}
