//! Per-glyph box derivation.
//!
//! Width and height are adjusted independently: a raw bounding box below
//! the minimum is expanded (symmetrically where the boundaries allow),
//! one above the maximum is shrunk or rejected.

use kurbo::Rect;

use crate::{
    Error, Result,
    glyph::GlyphRecord,
    metrics::FontMetrics,
    options::{Options, WidthShrinkPolicy},
};

/// Resolves each glyph's raw bounding box into one satisfying the
/// font-wide size invariants: `min_box_w <= width <= max_box_w` and
/// `height >= min_box_h`.
#[derive(Debug, Clone, Copy)]
pub struct BoxResolver<'a> {
    metrics: &'a FontMetrics,
    shrink_policy: WidthShrinkPolicy,
}

impl<'a> BoxResolver<'a> {
    pub fn new(metrics: &'a FontMetrics, shrink_policy: WidthShrinkPolicy) -> Self {
        Self {
            metrics,
            shrink_policy,
        }
    }

    pub fn resolve(&self, glyph: &GlyphRecord) -> Result<Rect> {
        let m = self.metrics;
        let (mut x0, mut x1) = (glyph.bbox.x0, glyph.bbox.x1);
        let (mut y0, mut y1) = (glyph.bbox.y0, glyph.bbox.y1);

        let width = x1 - x0;
        if width < m.min_box_w {
            (x0, x1) = self.expand_width(x0, x1, glyph.advance);
        } else if width > m.max_box_w {
            (x0, x1) = self.shrink_width(x0, x1);
        }

        let height = y1 - y0;
        if height < m.min_box_h {
            (y0, y1) = self.expand_height(y0, y1);
        } else if height > m.max_box_h {
            // The maximum was derived from this same glyph set, so a
            // taller glyph means the metrics belong to a different font.
            return Err(Error::GlyphTooTall {
                glyph_id: glyph.glyph_id,
                height,
                max: m.max_box_h,
            });
        }

        Ok(Rect::new(x0, y0, x1, y1))
    }

    fn expand_width(&self, x0: f64, x1: f64, advance: f64) -> (f64, f64) {
        let min_w = self.metrics.min_box_w;
        if (x0, x1) == (0.0, 0.0) {
            // Blank glyph: center a minimum-width box in its advance.
            let left = (advance - min_w) / 2.0;
            return (left, left + min_w);
        }
        let diff = min_w - (x1 - x0);
        (x0 - diff / 2.0, x1 + diff / 2.0)
    }

    fn shrink_width(&self, x0: f64, x1: f64) -> (f64, f64) {
        match self.shrink_policy {
            WidthShrinkPolicy::ClampToOrigin => {
                (x0.max(0.0), x1.min(self.metrics.max_box_w))
            }
            WidthShrinkPolicy::Recenter => {
                let mid = (x0 + x1) / 2.0;
                let half = self.metrics.max_box_w / 2.0;
                (mid - half, mid + half)
            }
        }
    }

    fn expand_height(&self, y0: f64, y1: f64) -> (f64, f64) {
        let m = self.metrics;
        if (y0, y1) == (0.0, 0.0) {
            // Blank glyph: center a minimum-height box in the ascent band.
            let bottom = (m.ascent - m.min_box_h) / 2.0;
            return (bottom, bottom + m.min_box_h);
        }
        let diff = m.min_box_h - (y1 - y0);
        if y0 - diff / 2.0 >= m.underline_position && y1 + diff / 2.0 <= m.max_box_h {
            return (y0 - diff / 2.0, y1 + diff / 2.0);
        }
        // One-sided growth by the full deficit: downward while the lower
        // edge stays above the underline, otherwise upward.
        if y0 - diff >= m.underline_position {
            (y0 - diff, y1)
        } else {
            (y0, y1 + diff)
        }
    }
}

/// The uniform box used by the code-font pipeline: a fixed fraction of the
/// glyph's advance width, centered, spanning the full descender-to-ascender
/// band. Code boxes and their companion direction boxes share these bounds
/// so the derived fonts superimpose.
pub fn uniform_box(advance: f64, metrics: &FontMetrics, options: &Options) -> Rect {
    let w = advance * options.width_shrink_factor;
    let x0 = ((advance - w) / 2.0).round();
    let x1 = (advance - (advance - w) / 2.0).round();
    Rect::new(x0, metrics.descent, x1, metrics.ascent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> FontMetrics {
        FontMetrics {
            reference_advance: 1000.0,
            ascent: 800.0,
            descent: -200.0,
            underline_position: -100.0,
            max_glyph_width: 1200.0,
            max_glyph_height: 700.0,
            min_box_w: 650.0,
            max_box_w: 900.0,
            min_box_h: 490.0,
            max_box_h: 700.0,
        }
    }

    fn glyph(bbox: Rect) -> GlyphRecord {
        GlyphRecord {
            glyph_id: 7,
            advance: 1000.0,
            bbox,
            codepoint: None,
        }
    }

    fn resolve(bbox: Rect) -> Result<Rect> {
        let m = metrics();
        BoxResolver::new(&m, WidthShrinkPolicy::ClampToOrigin).resolve(&glyph(bbox))
    }

    #[test]
    fn test_in_range_box_untouched() {
        let raw = Rect::new(50.0, 0.0, 750.0, 600.0);
        assert_eq!(resolve(raw).unwrap(), raw);
    }

    #[test]
    fn test_blank_glyph_centered_in_advance() {
        let resolved = resolve(Rect::ZERO).unwrap();
        assert_eq!((resolved.x0, resolved.x1), (175.0, 825.0));
        // Vertically centered in [0, ascent]
        assert_eq!((resolved.y0, resolved.y1), (155.0, 645.0));
    }

    #[test]
    fn test_narrow_box_expands_symmetrically() {
        let resolved = resolve(Rect::new(400.0, 0.0, 600.0, 600.0)).unwrap();
        // Deficit of 450 split evenly between the sides.
        assert_eq!((resolved.x0, resolved.x1), (175.0, 825.0));
        assert_eq!(resolved.width(), 650.0);
    }

    #[test]
    fn test_wide_box_clamps_toward_origin() {
        let resolved = resolve(Rect::new(-100.0, 0.0, 1100.0, 600.0)).unwrap();
        assert_eq!((resolved.x0, resolved.x1), (0.0, 900.0));

        // A wide box already starting inside [0, max] keeps its left edge.
        let resolved = resolve(Rect::new(40.0, 0.0, 1240.0, 600.0)).unwrap();
        assert_eq!((resolved.x0, resolved.x1), (40.0, 900.0));
    }

    #[test]
    fn test_wide_box_recenters_under_alternate_policy() {
        let m = metrics();
        let resolver = BoxResolver::new(&m, WidthShrinkPolicy::Recenter);
        let resolved = resolver
            .resolve(&glyph(Rect::new(100.0, 0.0, 1300.0, 600.0)))
            .unwrap();
        assert_eq!((resolved.x0, resolved.x1), (250.0, 1150.0));
        assert_eq!(resolved.width(), 900.0);
    }

    #[test]
    fn test_short_box_expands_symmetrically() {
        let resolved = resolve(Rect::new(0.0, 100.0, 700.0, 390.0)).unwrap();
        // Deficit of 200 split evenly; both boundaries stay legal.
        assert_eq!((resolved.y0, resolved.y1), (0.0, 490.0));
    }

    #[test]
    fn test_short_box_near_underline_grows_upward() {
        // Symmetric growth would push the lower edge below the underline
        // and the box bottom cannot drop the full deficit either.
        let resolved = resolve(Rect::new(0.0, -90.0, 700.0, 110.0)).unwrap();
        assert_eq!((resolved.y0, resolved.y1), (-90.0, 400.0));
    }

    #[test]
    fn test_short_box_near_top_grows_downward() {
        // Symmetric growth would exceed the maximum height; dropping the
        // lower edge by the full deficit keeps it above the underline.
        let resolved = resolve(Rect::new(0.0, 480.0, 700.0, 680.0)).unwrap();
        assert_eq!((resolved.y0, resolved.y1), (190.0, 680.0));
    }

    #[test]
    fn test_width_invariant_holds() {
        let m = metrics();
        for raw in [
            Rect::ZERO,
            Rect::new(0.0, 0.0, 10.0, 500.0),
            Rect::new(300.0, 0.0, 700.0, 500.0),
            Rect::new(-50.0, 0.0, 1200.0, 500.0),
        ] {
            let resolved = resolve(raw).unwrap();
            assert!(resolved.width() >= m.min_box_w, "raw {raw:?}");
            assert!(resolved.width() <= m.max_box_w, "raw {raw:?}");
            assert!(resolved.height() >= m.min_box_h, "raw {raw:?}");
        }
    }

    #[test]
    fn test_too_tall_glyph_is_fatal() {
        let result = resolve(Rect::new(0.0, -100.0, 700.0, 650.0));
        assert!(matches!(
            result,
            Err(Error::GlyphTooTall { glyph_id: 7, .. })
        ));
    }

    #[test]
    fn test_uniform_box_spans_vertical_band() {
        let m = metrics();
        let bounds = uniform_box(1000.0, &m, &Options::default());
        assert_eq!(bounds, Rect::new(50.0, -200.0, 950.0, 800.0));
    }

    #[test]
    fn test_uniform_box_rounds_odd_advances() {
        let m = metrics();
        let bounds = uniform_box(605.0, &m, &Options::default());
        // 605 * 0.9 = 544.5, margin 30.25 per side
        assert_eq!((bounds.x0, bounds.x1), (30.0, 575.0));
    }
}
