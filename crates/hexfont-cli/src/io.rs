use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

/// Contents of `path`, or all of stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("can't open {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("can't write {}", path.display()))
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(content.as_bytes())?;
            out.flush()?;
            Ok(())
        }
    }
}
