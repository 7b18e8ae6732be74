use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },
    #[error("line {line}: expected codepoint:hexdata, {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("line {line}: expected {expected} hexdigits for U+{codepoint:04X}, got {actual}")]
    GlyphLengthMismatch {
        line: usize,
        codepoint: u32,
        expected: usize,
        actual: usize,
    },
    #[error("that's not a font, it would seem: found {found} glyphs, need at least {required}")]
    EmptyFont { found: usize, required: usize },
    #[error("line {line}: expected {expected}, got '{found}'")]
    UnexpectedLine {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("line {line}: glyph U+{codepoint:04X} multiply defined")]
    DuplicateGlyph { line: usize, codepoint: u32 },
    #[error("line {line}: unsorted input: codepoint U+{codepoint:04X} follows U+{previous:04X}")]
    UnsortedInput {
        line: usize,
        codepoint: u32,
        previous: u32,
    },
    #[error("line {line}, glyph U+{codepoint:04X}: pixels must be SPACE or FULL BLOCK, found '{found}'")]
    InvalidPixelGlyph {
        line: usize,
        codepoint: u32,
        found: char,
    },
    #[error("line {line}, glyph U+{codepoint:04X}: expected {expected} pixels between || delimiters, found {actual}")]
    PixelCountMismatch {
        line: usize,
        codepoint: u32,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}, glyph U+{codepoint:04X}: incomplete glyph due to early end of input")]
    TruncatedInput { line: usize, codepoint: u32 },
    #[error("glyph U+{codepoint:04X}: bitmap holds {actual} bytes, expected {expected}")]
    BitmapLength {
        codepoint: u32,
        expected: usize,
        actual: usize,
    },
    #[error("a canvas of {columns}x{rows} cells is too large")]
    CanvasTooLarge { columns: usize, rows: usize },
    #[error("line {line}: too many glyphs (max {limit})")]
    ResourceExhausted { line: usize, limit: usize },
    #[error("archive error: {0}")]
    Archive(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
    #[error("formatting error")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
