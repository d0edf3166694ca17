//! Synthetic outline construction.

use kurbo::{Point, Rect};

use crate::{Error, Result};

/// A replacement glyph outline: zero or more closed polygonal contours.
///
/// Contours are plain vertex lists in font units (f64; rounding to
/// integer coordinates happens when the outline is written into a font).
/// Multiple disjoint contours per glyph are expected and legal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    contours: Vec<Vec<Point>>,
}

impl Outline {
    pub fn contours(&self) -> &[Vec<Point>] {
        &self.contours
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Vec::len).sum()
    }

    /// Tightest rectangle enclosing all vertices, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.contours.iter().flatten();
        let first = points.next()?;
        let mut bounds = Rect::from_points(*first, *first);
        for p in points {
            bounds = bounds.union_pt(*p);
        }
        Some(bounds)
    }

    fn push_contour(&mut self, points: Vec<Point>) {
        self.contours.push(points);
    }
}

/// Trace the direction-box silhouette: the symbol `[` with a notch carved
/// into the right edge between the lower and upper third marks.
///
/// Eight vertices, clockwise from the bottom-left corner.
pub fn bracket_outline(bounds: Rect) -> Outline {
    let Rect { x0, y0, x1, y1 } = bounds;
    let x_mid = x0 + (x1 - x0) / 2.0;
    let y_lower = y0 + (y1 - y0) / 3.0;
    let y_upper = y1 - (y1 - y0) / 3.0;

    let mut outline = Outline::default();
    outline.push_contour(vec![
        Point::new(x0, y0),
        Point::new(x0, y1),
        Point::new(x1, y1),
        Point::new(x1, y_upper),
        Point::new(x_mid, y_upper),
        Point::new(x_mid, y_lower),
        Point::new(x1, y_lower),
        Point::new(x1, y0),
    ]);
    outline
}

/// Encode `index` as filled cells in a `rows` x `cols` grid inscribed in
/// `bounds`: bit 0 at the top-left cell, rows filling top to bottom,
/// columns left to right. Each set bit becomes an independent closed
/// rectangle; index 0 produces an empty outline.
pub fn code_outline(index: usize, bounds: Rect, rows: u32, cols: u32) -> Result<Outline> {
    let capacity = rows * cols;
    let bits = bit_length(index);
    if bits > capacity {
        return Err(Error::IndexOverflow {
            index,
            bits,
            rows,
            cols,
            capacity,
        });
    }

    let cell_w = bounds.width() / cols as f64;
    let cell_h = bounds.height() / rows as f64;

    let mut outline = Outline::default();
    for i in 0..bits {
        if index >> i & 1 == 0 {
            continue;
        }
        let row = (i / cols) as f64;
        let col = (i % cols) as f64;
        let left = bounds.x0 + cell_w * col;
        let top = bounds.y1 - cell_h * row;
        outline.push_contour(vec![
            Point::new(left, top),
            Point::new(left, top - cell_h),
            Point::new(left + cell_w, top - cell_h),
            Point::new(left + cell_w, top),
        ]);
    }
    Ok(outline)
}

/// Bits needed to write `n` in binary; zero still takes one digit.
fn bit_length(n: usize) -> u32 {
    (usize::BITS - n.leading_zeros()).max(1)
}
