//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{boxer, encode, style};

#[derive(Parser)]
#[command(name = "codebox-fonts")]
#[command(about = "Turn every glyph of a font into a direction box or a binary code box")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct EncodeArgs {
    /// Source font file.
    pub input: PathBuf,
    /// Output directory; defaults to the input's directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Mapping table path; defaults to codeFontMappings.json in the
    /// output directory.
    #[arg(long)]
    pub mappings: Option<PathBuf>,
    /// Code grid rows.
    #[arg(long, default_value_t = 4)]
    pub rows: u32,
    /// Code grid columns.
    #[arg(long, default_value_t = 2)]
    pub cols: u32,
    /// Box width as a fraction of each glyph's advance width.
    #[arg(long, default_value_t = 0.9)]
    pub box_width_factor: f64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct StyleArgs {
    /// Source style document (JSON).
    pub input: PathBuf,
    /// Font name the full style uses; the box style uses "<FONT>-Box".
    #[arg(long, default_value = "Cousine Regular")]
    pub font: String,
    /// Glyph source URL template ({fontstack}/{range} placeholders).
    #[arg(long, default_value = "mapbox://fonts/masel/{fontstack}/{range}.pbf")]
    pub glyphs_url: String,
    /// Extra letter spacing (em) added to every symbol layer.
    #[arg(long, default_value_t = 0.1)]
    pub letter_spacing: f64,
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace every glyph with a direction box fitted to its letter.
    Box {
        /// Source font file.
        input: PathBuf,
        /// Output path; defaults to <stem>-Box.<ext> next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create the code font, its companion box font, and the mapping
    /// table used to decode them.
    Encode {
        #[command(flatten)]
        args: EncodeArgs,
    },
    /// Rewrite a map style document against the derived fonts.
    Style {
        #[command(flatten)]
        args: StyleArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Box { input, output } => boxer::run(&input, output),
            Commands::Encode { args } => encode::run(&args),
            Commands::Style { args } => style::run(&args),
        }
    }
}
