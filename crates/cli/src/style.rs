//! The `style` command: derive full/label/box map style variants.

use anyhow::{Context, Result};
use codebox_map_style::{StyleDoc, derive_variants};

use crate::{cli::StyleArgs, io::ensure_dir};

pub fn run(args: &StyleArgs) -> Result<()> {
    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read style: {}", args.input.display()))?;
    let source = StyleDoc::from_slice(&data)
        .with_context(|| format!("Failed to parse style: {}", args.input.display()))?;

    let variants = derive_variants(
        &source,
        &args.font,
        &args.glyphs_url,
        args.letter_spacing,
    )?;

    ensure_dir(&args.out_dir)?;
    for variant in variants {
        let path = args.out_dir.join(format!("{}.json", variant.name));
        let json = variant.doc.to_json_pretty()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write style: {}", path.display()))?;
        println!("Created: {}", path.display());
    }
    Ok(())
}
