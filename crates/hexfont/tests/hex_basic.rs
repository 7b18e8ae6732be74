use hexfont::{
    hex::{self, DecodeOptions},
    names::NoNames,
    test_support::{tiny_font, TINY_HEX},
    CellWidth, Font, FontError, FontMetrics, Glyph, GlyphStore, REPLACEMENT_CHAR,
};
use pretty_assertions::assert_eq;

const ONE_PIXEL: &str = "# Width: 1\n# Height: 1\n0041:80\n";

fn strict(text: &str) -> hexfont::Result<Font> {
    hex::decode(text, &DecodeOptions::strict())
}

fn lenient(text: &str) -> hexfont::Result<Font> {
    hex::decode(text, &DecodeOptions::lenient())
}

#[test]
fn one_pixel_font() {
    let font = strict(ONE_PIXEL).unwrap();
    assert_eq!(font.glyphs.len(), 1);
    let glyph = font.glyphs.get('A').expect("glyph A");
    assert_eq!(glyph.bitmap, vec![0x80]);
    assert_eq!(glyph.cell_width, CellWidth::Single);
    assert_eq!(font.to_hex().unwrap(), ONE_PIXEL);
}

#[test]
fn header_order_does_not_matter() {
    let font = strict("# Height: 1\n# Width: 1\n0041:80\n").unwrap();
    assert_eq!(font, strict(ONE_PIXEL).unwrap());
    assert_eq!(font.to_hex().unwrap(), ONE_PIXEL);
}

#[test]
fn tiny_font_round_trip() {
    let font = tiny_font().unwrap();
    assert_eq!(font.glyphs.len(), 4);
    assert_eq!(font.to_hex().unwrap(), TINY_HEX);
    assert_eq!(strict(&font.to_hex().unwrap()).unwrap(), font);
}

#[test]
fn records_are_sorted_on_load() {
    let font = strict("# Width: 1\n# Height: 1\n0042:00\n0041:80\n").unwrap();
    let order: Vec<char> = font.glyphs.iter().map(|g| g.codepoint).collect();
    assert_eq!(order, vec!['A', 'B']);
    assert_eq!(font.to_hex().unwrap(), "# Width: 1\n# Height: 1\n0041:80\n0042:00\n");
}

#[test]
fn uppercase_digits_and_comments() {
    let font = strict("# Width: 5\n# Height: 2\n# a comment\n\n0041:F888\n").unwrap();
    assert_eq!(font.glyphs.lookup('A').bitmap, vec![0xF8, 0x88]);
    assert_eq!(font.to_hex().unwrap(), "# Width: 5\n# Height: 2\n0041:f888\n");
}

#[test]
fn crlf_line_endings() {
    let font = strict("# Width: 1\r\n# Height: 1\r\n0041:80\r\n").unwrap();
    assert_eq!(font, strict(ONE_PIXEL).unwrap());
}

#[test]
fn narrow_glyph_length_mismatch() {
    let err = strict("# Width: 5\n# Height: 2\n0041:f8\n").unwrap_err();
    assert!(matches!(
        err,
        FontError::GlyphLengthMismatch {
            line: 3,
            codepoint: 0x41,
            expected: 4,
            actual: 2
        }
    ));
}

#[test]
fn wide_glyph_needs_wide_record() {
    let err = strict("# Width: 5\n# Height: 2\n4e2d:f8f8\n").unwrap_err();
    assert!(matches!(
        err,
        FontError::GlyphLengthMismatch {
            line: 3,
            expected: 8,
            actual: 4,
            ..
        }
    ));
}

#[test]
fn invalid_hex_digit() {
    let err = strict("# Width: 1\n# Height: 1\n0041:8g\n").unwrap_err();
    assert!(matches!(err, FontError::MalformedRecord { line: 3, .. }));
}

#[test]
fn bad_headers() {
    assert!(matches!(
        strict("# Width: 0\n# Height: 1\n0041:80\n").unwrap_err(),
        FontError::MalformedHeader { .. }
    ));
    assert!(matches!(
        strict("# Size: 8\n# Height: 1\n").unwrap_err(),
        FontError::MalformedHeader { line: 1, .. }
    ));
    assert!(matches!(
        strict("# Width: 8\n").unwrap_err(),
        FontError::MalformedHeader { .. }
    ));
    // positive, but the glyph sizes derived from it overflow
    let huge = format!("# Width: {}\n# Height: 1\n4e2d:00\n", usize::MAX / 2 + 1);
    assert!(matches!(
        strict(&huge).unwrap_err(),
        FontError::MalformedHeader { line: 2, .. }
    ));
    let tall = format!("# Width: 8\n# Height: {}\n0041:00\n", usize::MAX);
    assert!(matches!(
        strict(&tall).unwrap_err(),
        FontError::MalformedHeader { .. }
    ));
}

#[test]
fn strict_rejects_stray_lines() {
    let err = strict("# Width: 1\n# Height: 1\n0041:80\nnot a record\n").unwrap_err();
    assert!(matches!(err, FontError::MalformedRecord { line: 4, .. }));
}

#[test]
fn lenient_skips_stray_lines() {
    let font = lenient("# Width: 1\n# Height: 1\n0041:80\nnot a record\n0042:00\n").unwrap();
    assert_eq!(font.glyphs.len(), 2);
}

#[test]
fn lenient_still_rejects_bad_lengths() {
    let err = lenient("# Width: 1\n# Height: 1\n0041:80\n0042:0000\n").unwrap_err();
    assert!(matches!(err, FontError::GlyphLengthMismatch { line: 4, .. }));
}

#[test]
fn rasterizer_fonts_need_two_glyphs() {
    let err = lenient(ONE_PIXEL).unwrap_err();
    assert!(matches!(
        err,
        FontError::EmptyFont {
            found: 1,
            required: 2
        }
    ));
}

#[test]
fn empty_table() {
    let err = strict("# Width: 1\n# Height: 1\n").unwrap_err();
    assert!(matches!(err, FontError::EmptyFont { found: 0, .. }));
}

#[test]
fn duplicates() {
    let text = "# Width: 1\n# Height: 1\n0041:80\n0041:00\n0042:00\n";
    assert!(matches!(
        strict(text).unwrap_err(),
        FontError::DuplicateGlyph {
            line: 4,
            codepoint: 0x41
        }
    ));
    let font = lenient(text).unwrap();
    assert_eq!(font.glyphs.lookup('A').bitmap, vec![0x80]);
}

#[test]
fn glyph_ceiling() {
    let options = DecodeOptions {
        max_glyphs: 2,
        ..DecodeOptions::strict()
    };
    let err = hex::decode(
        "# Width: 1\n# Height: 1\n0041:80\n0042:80\n0043:80\n",
        &options,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FontError::ResourceExhausted { line: 5, limit: 2 }
    ));
}

#[test]
fn missing_glyph_resolves_to_replacement() {
    let font = tiny_font().unwrap();
    let glyph = font.lookup('Z');
    assert_eq!(glyph.codepoint, REPLACEMENT_CHAR);
    assert_eq!(glyph.bitmap, vec![0xAA, 0xAA]);
    // the synthesized glyph is never written out
    assert!(!font.to_hex().unwrap().contains("fffd"));
}

#[test]
fn font_supplies_its_own_replacement() {
    let font = strict("# Width: 1\n# Height: 1\n0041:80\nfffd:00\n").unwrap();
    assert_eq!(font.lookup('Z').bitmap, vec![0x00]);
}

#[test]
fn hand_built_store_checks_bitmap_length() {
    let metrics = FontMetrics::new(8, 2).unwrap();
    let err = GlyphStore::new(&metrics, vec![Glyph::new('A', vec![0xFF])]).unwrap_err();
    assert!(matches!(
        err,
        FontError::BitmapLength {
            codepoint: 0x41,
            expected: 2,
            actual: 1
        }
    ));

    let store = GlyphStore::new(&metrics, vec![Glyph::new('A', vec![0xFF, 0x81])]).unwrap();
    let font = Font::new(metrics, store);
    assert_eq!(font.to_hex().unwrap(), "# Width: 8\n# Height: 2\n0041:ff81\n");
    assert!(font.to_src(&NoNames).unwrap().contains("00 |█      █|\n"));
}

#[test]
fn from_bytes_rejects_invalid_utf8() {
    let err = Font::from_bytes(b"# Width: 1\n\xff\n", &DecodeOptions::strict()).unwrap_err();
    assert!(matches!(err, FontError::Utf8(_)));
}

#[test]
fn read_from_reader() {
    let font = Font::read(TINY_HEX.as_bytes(), &DecodeOptions::strict()).unwrap();
    assert_eq!(font, tiny_font().unwrap());
}

#[cfg(feature = "archive")]
#[test]
fn zipped_equals_plain() {
    use std::io::{Cursor, Write};
    use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buf);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("README", options).unwrap();
        zip.write_all(b"not a font").unwrap();
        zip.start_file("tiny.hex", options).unwrap();
        zip.write_all(TINY_HEX.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    let zipped = Font::from_bytes(buf.get_ref(), &DecodeOptions::strict()).unwrap();
    assert_eq!(zipped, tiny_font().unwrap());
}
