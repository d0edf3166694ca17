//! Per-glyph input records extracted from a parsed font.

use std::collections::HashMap;

use kurbo::Rect;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::Glyph,
    types::GlyphId,
};

use crate::{Error, Result};

/// One glyph's raw inputs to the conversion: advance width, tightest ink
/// bounding box, and the code point it is encoded at (if any).
///
/// Records are pure values; the glyph's outline itself is never read, only
/// replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub glyph_id: u32,
    pub advance: f64,
    /// Raw bounding box. Empty glyphs report the degenerate `(0,0,0,0)`.
    pub bbox: Rect,
    pub codepoint: Option<u32>,
}

impl GlyphRecord {
    pub fn width(&self) -> f64 {
        self.bbox.width()
    }

    pub fn height(&self) -> f64 {
        self.bbox.height()
    }
}

/// Scan a font into glyph records, in ascending glyph id order.
///
/// The order is load-bearing: mapping-table indices are assigned in
/// iteration order and must be reproducible across independently loaded
/// copies of the same font.
pub fn scan_font(font: &FontRef) -> Result<Vec<GlyphRecord>> {
    let num_glyphs = font.maxp()?.num_glyphs();
    let glyf = font.glyf().map_err(|_| Error::MissingTable("glyf"))?;
    let loca = font.loca(None).map_err(|_| Error::MissingTable("loca"))?;
    let hmtx = font.hmtx().map_err(|_| Error::MissingTable("hmtx"))?;

    let codepoints = codepoints_by_glyph(font);

    let mut records = Vec::with_capacity(num_glyphs as usize);
    for gid in 0..num_glyphs as u32 {
        let glyph_id = GlyphId::new(gid);
        let bbox = match loca.get_glyf(glyph_id, &glyf)? {
            Some(Glyph::Simple(g)) => Rect::new(
                g.x_min() as f64,
                g.y_min() as f64,
                g.x_max() as f64,
                g.y_max() as f64,
            ),
            Some(Glyph::Composite(g)) => Rect::new(
                g.x_min() as f64,
                g.y_min() as f64,
                g.x_max() as f64,
                g.y_max() as f64,
            ),
            None => Rect::ZERO,
        };

        records.push(GlyphRecord {
            glyph_id: gid,
            advance: hmtx.advance(glyph_id).unwrap_or(0) as f64,
            bbox,
            codepoint: codepoints.get(&gid).copied(),
        });
    }
    Ok(records)
}

/// Reverse cmap index. When several code points map to one glyph, the
/// smallest wins so the result is deterministic.
fn codepoints_by_glyph(font: &FontRef) -> HashMap<u32, u32> {
    let mut by_gid = HashMap::new();
    let Ok(cmap) = font.cmap() else {
        return by_gid;
    };
    for record in cmap.encoding_records() {
        let Ok(subtable) = record.subtable(cmap.offset_data()) else {
            continue;
        };
        for (cp, gid) in subtable.iter() {
            by_gid
                .entry(gid.to_u32())
                .and_modify(|existing: &mut u32| *existing = (*existing).min(cp))
                .or_insert(cp);
        }
    }
    by_gid
}
