//! The `box` command: one direction-box font, boxes fitted per glyph.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codebox_font_boxer::{Options, direction_font};

use crate::io::{file_name_with_suffix, read_font, write_font};

pub fn run(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let data = read_font(input)?;

    let boxed = direction_font(&data, &Options::default())
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    let output = output.unwrap_or_else(|| {
        input.with_file_name(file_name_with_suffix(input, "-Box"))
    });
    write_font(&output, &boxed)?;
    println!("Created: {}", output.display());
    Ok(())
}
