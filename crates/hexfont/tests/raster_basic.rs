use hexfont::{
    layout::{self, Extents},
    rasterize,
    test_support::{ink_rows, tiny_font},
    FontError, RasterOptions, TextBuffer,
};
use pretty_assertions::assert_eq;

fn render(text: &str) -> Vec<String> {
    let font = tiny_font().unwrap();
    let canvas = rasterize(&font, &TextBuffer::from(text), &RasterOptions::default()).unwrap();
    ink_rows(&canvas)
}

#[test]
fn two_letters_side_by_side() {
    assert_eq!(render("AB"), vec!["#########.", "#...#####."]);
}

#[test]
fn glyphs_do_not_overlap() {
    assert_eq!(render("BB"), vec!["####.####.", "####.####."]);
}

#[test]
fn lone_combining_mark() {
    assert_eq!(render("\u{0301}"), vec!["..#..", "....."]);
}

#[test]
fn combining_mark_overlays_base() {
    assert_eq!(render("B\u{0301}"), vec!["####.", "####."]);
}

#[test]
fn wide_glyph() {
    assert_eq!(render("\u{4E2D}"), vec!["##########", "#........#"]);
}

#[test]
fn missing_glyph_is_checkerboard() {
    assert_eq!(render("Z"), vec!["#.#.#", "#.#.#"]);
}

#[test]
fn lines_stack_vertically() {
    assert_eq!(render("A\nB"), vec!["#####", "#...#", "####.", "####."]);
}

#[test]
fn inverted_polarity() {
    let font = tiny_font().unwrap();
    let options = RasterOptions {
        inverted: true,
        ..RasterOptions::default()
    };
    let canvas = rasterize(&font, &TextBuffer::from("A"), &options).unwrap();
    assert_eq!(canvas.as_bytes(), &[0x07, 0x77]);
    assert_eq!(ink_rows(&canvas), vec!["#####", "#...#"]);
}

#[test]
fn canvas_is_sized_from_the_grid() {
    let font = tiny_font().unwrap();
    let canvas = rasterize(&font, &TextBuffer::from("A\tB"), &RasterOptions::default()).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (45, 2));
    assert_eq!(canvas.stride(), 6);
}

#[test]
fn empty_text_gives_empty_canvas() {
    let font = tiny_font().unwrap();
    let canvas = rasterize(&font, &TextBuffer::default(), &RasterOptions::default()).unwrap();
    assert!(canvas.is_empty());
}

#[test]
fn every_placement_fits_the_measured_grid() {
    let text = TextBuffer::from("ab\tc\n\u{4E2D}e\u{0301}\u{0B}f\r\ng");
    let extents = layout::measure(&text, 8);
    assert_eq!(extents, Extents { rows: 4, columns: 9 });
    for p in layout::placements(&text, 8) {
        assert!(p.row < extents.rows, "{p:?} below the grid");
        assert!(p.col + p.cell_width.cells() <= extents.columns, "{p:?} right of the grid");
    }
    // drawing must not panic on any of them
    let font = tiny_font().unwrap();
    let canvas = rasterize(&font, &text, &RasterOptions::default()).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (45, 8));
}

#[test]
fn runaway_tabs_do_not_overflow_the_canvas() {
    let font = tiny_font().unwrap();
    let options = RasterOptions {
        tab_stop: usize::MAX / 2 + 1,
        ..RasterOptions::default()
    };
    let err = rasterize(&font, &TextBuffer::from("\t\tA"), &options).unwrap_err();
    assert!(matches!(
        err,
        FontError::CanvasTooLarge {
            columns: usize::MAX,
            rows: 1
        }
    ));
}
