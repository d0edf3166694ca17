//! # Codebox Font Boxer
//!
//! Derives synthetic fonts from a source font: every glyph becomes either
//! a direction box (a bracket-shaped outline sized to the original
//! letter's footprint) or a code box (a binary block grid identifying the
//! glyph's canonical character in a generated mapping table).
//!
//! Works best on monospace sources; thin glyphs make uneven boxes.
//!
//! ## Example
//!
//! ```no_run
//! use codebox_font_boxer::{Options, code_font, direction_font};
//!
//! let data = std::fs::read("input.ttf").unwrap();
//! let options = Options::default();
//!
//! let boxed = direction_font(&data, &options).unwrap();
//! std::fs::write("input-Box.ttf", boxed).unwrap();
//!
//! let (coded, table) = code_font(&data, &options).unwrap();
//! std::fs::write("input-Code.ttf", coded).unwrap();
//! std::fs::write(
//!     "codeFontMappings.json",
//!     serde_json::to_vec_pretty(&table).unwrap(),
//! )
//! .unwrap();
//! ```

mod charmap;
mod error;
mod font;
mod geometry;
mod glyph;
mod metrics;
mod options;
mod outline;

pub use charmap::{MappingTable, MappingTableBuilder, SPACE_PLACEHOLDER, normalize};
pub use error::{Error, Result};
pub use font::{BoxMode, Font};
pub use geometry::{BoxResolver, uniform_box};
pub use glyph::GlyphRecord;
pub use metrics::FontMetrics;
pub use options::{DEFAULT_SYMBOLS, Options, WidthShrinkPolicy};
pub use outline::{Outline, bracket_outline, code_outline};

/// Convert font data into the direction-box font (boxes fitted to each
/// glyph's ink).
pub fn direction_font(data: &[u8], options: &Options) -> Result<Vec<u8>> {
    Font::new(data)?.to_direction_boxes(BoxMode::Fitted, options)
}

/// Convert font data into the code-box font plus its mapping table
/// (uniform boxes, so codes line up with the companion box font).
pub fn code_font(data: &[u8], options: &Options) -> Result<(Vec<u8>, MappingTable)> {
    Font::new(data)?.to_code_boxes(BoxMode::Uniform, options)
}
