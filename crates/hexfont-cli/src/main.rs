use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use hexfont::{
    names::{self, default_names},
    rasterize, src, BdfProperties, DecodeOptions, Font, FontMetrics, RasterOptions, TextBuffer,
};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::io::{read_input, write_output};
mod image;
mod io;

#[derive(Parser)]
#[command(name = "hexfont", about = "Hex bitmap font toolkit CLI", version)]
struct Cli {
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Convert a hex font to src (ASCII art)
    Hex2src {
        /// Hex font [stdin]
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Src document [stdout]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert src (ASCII art) back to a hex font
    Src2hex {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Glyph width in pixels
        #[arg(short = 'W', long, default_value = "12")]
        width: usize,
        /// Glyph height in pixels
        #[arg(short = 'H', long, default_value = "22")]
        height: usize,
    },
    /// Convert a hex font to BDF
    Hex2bdf {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// TOML file overriding the built-in Gallant font properties
        #[arg(long)]
        properties: Option<PathBuf>,
    },
    /// Render a text file to a black and white PNG image
    Render {
        #[arg(short, long, default_value = "jsgallant.hex")]
        font: PathBuf,
        #[arg(short, long, default_value = "input.txt")]
        text: PathBuf,
        #[arg(short, long, default_value = "output.png")]
        png: PathBuf,
        #[arg(short = 'T', long, default_value = "8")]
        tab_stop: usize,
        /// Black on white instead of white on black
        #[arg(short, long)]
        invert: bool,
    },
    /// List code points in [start, end) with display width and name
    List {
        #[arg(value_parser = parse_codepoint)]
        start: u32,
        #[arg(value_parser = parse_codepoint)]
        end: u32,
    },
}

fn parse_codepoint(arg: &str) -> Result<u32, String> {
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => arg.parse(),
    };
    parsed.map_err(|e| format!("can't convert '{arg}' to an integer: {e}"))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Cmd::Hex2src { input, output } => {
            let font = Font::from_bytes(&read_input(input.as_deref())?, &DecodeOptions::strict())?;
            info!("found {} glyphs", font.glyphs.len());
            let names = default_names();
            write_output(output.as_deref(), &font.to_src(names.as_ref())?)?;
        }
        Cmd::Src2hex {
            input,
            output,
            width,
            height,
        } => {
            let metrics = FontMetrics::new(width, height)
                .ok_or_else(|| anyhow!("width {width} and height {height} must be positive"))?;
            let text = String::from_utf8(read_input(input.as_deref())?)?;
            let font = src::decode(&text, metrics, &DecodeOptions::strict())?;
            info!("found {} glyphs", font.glyphs.len());
            write_output(output.as_deref(), &font.to_hex()?)?;
        }
        Cmd::Hex2bdf {
            input,
            output,
            properties,
        } => {
            let properties = match properties {
                Some(path) => {
                    let toml = fs::read_to_string(&path)
                        .with_context(|| format!("can't read {}", path.display()))?;
                    toml::from_str::<BdfProperties>(&toml)
                        .with_context(|| format!("invalid properties in {}", path.display()))?
                }
                None => BdfProperties::default(),
            };
            let font = Font::from_bytes(&read_input(input.as_deref())?, &DecodeOptions::strict())?;
            info!("found {} glyphs", font.glyphs.len());
            write_output(output.as_deref(), &font.to_bdf(&properties)?)?;
        }
        Cmd::Render {
            font,
            text,
            png,
            tab_stop,
            invert,
        } => {
            if tab_stop == 0 {
                bail!("tab stop must be positive");
            }
            let loaded = Font::load(&font, &DecodeOptions::lenient())
                .with_context(|| format!("can't load font {}", font.display()))?;
            info!(
                "found {} glyphs, width {}, height {} in {}",
                loaded.glyphs.len(),
                loaded.metrics.width(),
                loaded.metrics.height(),
                font.display()
            );
            let bytes =
                fs::read(&text).with_context(|| format!("can't open {}", text.display()))?;
            let options = RasterOptions {
                tab_stop,
                inverted: invert,
            };
            let canvas = rasterize(&loaded, &TextBuffer::from_bytes(&bytes), &options)?;
            if canvas.is_empty() {
                bail!("{} has nothing to draw", text.display());
            }
            image::write_png(&png, &canvas)?;
            info!(
                "wrote WxH = {}x{} image to {}",
                canvas.width(),
                canvas.height(),
                png.display()
            );
        }
        Cmd::List { start, end } => {
            let names = default_names();
            let listing: String = names::describe_range(start, end, names.as_ref())
                .map(|info| format!("{info}\n"))
                .collect();
            write_output(None, &listing)?;
        }
    }
    Ok(())
}
