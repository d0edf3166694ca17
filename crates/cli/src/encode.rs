//! The `encode` command: code font + companion box font + mapping table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codebox_font_boxer::{BoxMode, Font, Options};

use crate::{
    cli::EncodeArgs,
    io::{ensure_dir, file_name_with_suffix, read_font, write_font},
};

pub fn run(args: &EncodeArgs) -> Result<()> {
    let data = read_font(&args.input)?;
    let options = Options::default()
        .with_grid(args.rows, args.cols)
        .with_width_shrink_factor(args.box_width_factor);

    // Convert everything in memory first; a glyph that cannot be encoded
    // must not leave a half-written font pair behind.
    let font = Font::new(&data).context("Failed to parse font")?;
    let (code_data, table) = font
        .to_code_boxes(BoxMode::Uniform, &options)
        .with_context(|| format!("Failed to encode {}", args.input.display()))?;
    let box_data = font
        .to_direction_boxes(BoxMode::Uniform, &options)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    let out_dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => args
            .input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    ensure_dir(&out_dir)?;

    let code_path = out_dir.join(file_name_with_suffix(&args.input, "-Code"));
    let box_path = out_dir.join(file_name_with_suffix(&args.input, "-Box"));
    write_font(&code_path, &code_data)?;
    write_font(&box_path, &box_data)?;
    println!("Created: {}", code_path.display());
    println!("Created: {}", box_path.display());

    let mappings_path = match &args.mappings {
        Some(path) => path.clone(),
        None => out_dir.join("codeFontMappings.json"),
    };
    let json = serde_json::to_string_pretty(&table).context("Failed to serialize mapping table")?;
    std::fs::write(&mappings_path, json)
        .with_context(|| format!("Failed to write mappings: {}", mappings_path.display()))?;
    println!(
        "Created: {} ({} characters)",
        mappings_path.display(),
        table.len()
    );
    Ok(())
}
