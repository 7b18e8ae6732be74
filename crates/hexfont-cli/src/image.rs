use anyhow::{Context, Result};
use hexfont::Canvas;
use std::{fs::File, io::BufWriter, path::Path};

/// Save the canvas as a 1 bit grayscale PNG. A set bit is white.
pub fn write_png(path: &Path, canvas: &Canvas) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("can't create {}", path.display()))?;
    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        canvas.width() as u32,
        canvas.height() as u32,
    );
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::One);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(canvas.as_bytes())?;
    writer.finish()?;
    Ok(())
}
