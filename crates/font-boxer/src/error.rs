//! Error types for glyph box conversion.

use std::result;

use read_fonts::ReadError;
use write_fonts::BuilderError;

/// Errors that can occur while converting a font to boxes or code boxes.
///
/// None of these are retryable: every variant is a deterministic
/// input-consistency violation, and a conversion either fully succeeds
/// or aborts before any output is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("failed to build font: {0}")]
    Build(#[from] BuilderError),

    #[error("failed to build glyph: {0}")]
    GlyphBuild(#[from] write_fonts::error::Error),

    #[error("required table '{0}' not found")]
    MissingTable(&'static str),

    #[error(
        "box thresholds are degenerate (width {min_w}..{max_w}, height {min_h}..{max_h}); \
         the font's reference advance or glyph extremes are unusable"
    )]
    BadThresholds {
        min_w: f64,
        max_w: f64,
        min_h: f64,
        max_h: f64,
    },

    #[error("glyph {glyph_id} is {height} units tall, above the font-wide maximum of {max}")]
    GlyphTooTall {
        glyph_id: u32,
        height: f64,
        max: f64,
    },

    #[error("code {index} needs {bits} bits but the {rows}x{cols} grid holds only {capacity}")]
    IndexOverflow {
        index: usize,
        bits: u32,
        rows: u32,
        cols: u32,
        capacity: u32,
    },

    #[error("character {0:?} was not seen when the mapping table was built")]
    CharacterNotMapped(char),

    #[error("duplicate character {0:?} in mapping table")]
    DuplicateMapping(char),

    #[error("code point {0:#x} in mapping table is not a valid character")]
    InvalidCodepoint(u32),
}

pub type Result<T> = result::Result<T, Error>;
