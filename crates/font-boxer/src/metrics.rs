//! Font-wide metrics and box-size thresholds.

use log::debug;
use read_fonts::{FontRef, TableProvider};

use crate::{Error, Result, glyph::GlyphRecord, options::Options};

/// Font-wide scalars computed once per font, plus the derived box-size
/// thresholds every per-glyph adjustment honors.
///
/// The thresholds jointly guarantee the global layout properties: boxes
/// never touch (the minimum width leaves a horizontal margin smaller than
/// any box's own width), and the tallest box stays under twice the height
/// of the shortest.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    /// Advance width of the reference glyph (glyph id 0).
    pub reference_advance: f64,
    /// Typographic ascender.
    pub ascent: f64,
    /// Typographic descender (negative below the baseline).
    pub descent: f64,
    /// Lowest permissible y for a box edge before it goes below the line.
    pub underline_position: f64,
    pub max_glyph_width: f64,
    pub max_glyph_height: f64,
    pub min_box_w: f64,
    pub max_box_w: f64,
    pub min_box_h: f64,
    pub max_box_h: f64,
}

impl FontMetrics {
    /// Read the reference scalars from the font's tables and derive the
    /// thresholds from a single pass over `glyphs`.
    pub fn compute(font: &FontRef, glyphs: &[GlyphRecord], options: &Options) -> Result<Self> {
        let hhea = font.hhea()?;
        let ascent = hhea.ascender().to_i16() as f64;
        let descent = hhea.descender().to_i16() as f64;
        let underline_position = font
            .post()
            .map(|post| post.underline_position().to_i16() as f64)
            .unwrap_or(descent);
        Self::from_glyphs(glyphs, ascent, descent, underline_position, options)
    }

    /// Derive metrics from an in-memory glyph collection.
    pub fn from_glyphs(
        glyphs: &[GlyphRecord],
        ascent: f64,
        descent: f64,
        underline_position: f64,
        options: &Options,
    ) -> Result<Self> {
        let reference_advance = glyphs.first().map(|g| g.advance).unwrap_or(0.0);

        let mut max_glyph_width: f64 = 0.0;
        let mut max_glyph_height: f64 = 0.0;
        for glyph in glyphs {
            max_glyph_width = max_glyph_width.max(glyph.width());
            max_glyph_height = max_glyph_height.max(glyph.height());
        }

        let max_box_w = (options.width_shrink_factor * reference_advance).round();
        let max_box_h = max_glyph_height;
        let min_box_w = (options.width_expand_factor * reference_advance).round();
        let min_box_h = (options.height_expand_factor * max_box_h).round();

        if min_box_w >= max_box_w || min_box_h >= max_box_h {
            return Err(Error::BadThresholds {
                min_w: min_box_w,
                max_w: max_box_w,
                min_h: min_box_h,
                max_h: max_box_h,
            });
        }

        debug!(
            "box thresholds: width {min_box_w}..{max_box_w}, height {min_box_h}..{max_box_h}"
        );

        Ok(Self {
            reference_advance,
            ascent,
            descent,
            underline_position,
            max_glyph_width,
            max_glyph_height,
            min_box_w,
            max_box_w,
            min_box_h,
            max_box_h,
        })
    }
}
