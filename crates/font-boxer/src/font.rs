//! Font parsing, glyph replacement, and serialization.

use std::fmt::{self, Formatter};

use kurbo::Rect;
use log::{debug, info};
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::CurvePoint,
    types::{NameId, Tag},
};
use write_fonts::{
    FontBuilder,
    from_obj::ToOwnedTable,
    tables::{
        glyf::{Bbox, Contour, GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::Head,
        maxp::Maxp,
        name::{Name, NameRecord},
    },
};

use crate::{
    Result,
    charmap::{MappingTable, MappingTableBuilder, normalize},
    geometry::{BoxResolver, uniform_box},
    glyph::{GlyphRecord, scan_font},
    metrics::FontMetrics,
    options::Options,
    outline::{Outline, bracket_outline, code_outline},
};

/// How the replacement box for each glyph is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxMode {
    /// Resolve each glyph's own ink box against the font-wide thresholds,
    /// so the box just barely encloses the original letter.
    Fitted,
    /// A fixed fraction of the glyph's advance width, centered, spanning
    /// the full descender-to-ascender band. Code boxes and their
    /// companion direction boxes share these bounds.
    Uniform,
}

/// A parsed font ready for glyph replacement.
pub struct Font<'a> {
    data: &'a [u8],
    inner: FontRef<'a>,
}

impl fmt::Debug for Font<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("data_len", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Font<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Ok(Self {
            data,
            inner: FontRef::new(data)?,
        })
    }

    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Glyph records in ascending glyph id order.
    ///
    /// Both conversion passes iterate in this order; it is what makes
    /// mapping-table indices reproducible across separately loaded copies
    /// of the same font.
    pub fn glyphs(&self) -> Result<Vec<GlyphRecord>> {
        scan_font(&self.inner)
    }

    /// Replace every glyph with the bracket-shaped direction box.
    ///
    /// Advance widths are untouched, so text set in the derived font
    /// occupies exactly the space the original would.
    pub fn to_direction_boxes(&self, mode: BoxMode, options: &Options) -> Result<Vec<u8>> {
        let glyphs = self.glyphs()?;
        let metrics = FontMetrics::compute(&self.inner, &glyphs, options)?;
        self.build(&glyphs, &metrics, mode, options, "-Box", |_, bounds| {
            Ok(bracket_outline(bounds))
        })
    }

    /// Replace every glyph with the binary code box for its canonical
    /// character, and return the mapping table the codes index into.
    ///
    /// The table is built in the same glyph order as the replacement pass
    /// and must be persisted alongside the font for decoding.
    pub fn to_code_boxes(
        &self,
        mode: BoxMode,
        options: &Options,
    ) -> Result<(Vec<u8>, MappingTable)> {
        let glyphs = self.glyphs()?;
        let metrics = FontMetrics::compute(&self.inner, &glyphs, options)?;

        let mut builder = MappingTableBuilder::new();
        for glyph in &glyphs {
            builder.add(normalize(glyph.codepoint, &options.symbols_of_interest));
        }
        let table = builder.finish();
        debug!("mapping table holds {} canonical characters", table.len());

        let data = self.build(&glyphs, &metrics, mode, options, "-Code", |glyph, bounds| {
            let c = normalize(glyph.codepoint, &options.symbols_of_interest);
            code_outline(table.index_of(c)?, bounds, options.grid_rows, options.grid_cols)
        })?;
        Ok((data, table))
    }

    /// Run pass 2: synthesize a replacement outline per glyph and
    /// reassemble the font around the new `glyf`.
    ///
    /// Nothing is emitted unless every glyph converts; a fatal error
    /// leaves no partial output behind.
    fn build(
        &self,
        glyphs: &[GlyphRecord],
        metrics: &FontMetrics,
        mode: BoxMode,
        options: &Options,
        suffix: &str,
        mut synthesize: impl FnMut(&GlyphRecord, Rect) -> Result<Outline>,
    ) -> Result<Vec<u8>> {
        let resolver = BoxResolver::new(metrics, options.width_shrink_policy);

        let mut glyf_builder = GlyfLocaBuilder::new();
        let mut font_bounds: Option<Rect> = None;
        let mut max_points = 0usize;
        let mut max_contours = 0usize;

        for record in glyphs {
            let bounds = match mode {
                BoxMode::Fitted => resolver.resolve(record)?,
                BoxMode::Uniform => uniform_box(record.advance, metrics, options),
            };
            let outline = synthesize(record, bounds)?;
            let glyph = match simple_glyph(&outline) {
                Some(simple) => {
                    max_points = max_points.max(outline.point_count());
                    max_contours = max_contours.max(outline.contour_count());
                    let ink = outline.bounds().unwrap_or(bounds);
                    font_bounds = Some(match font_bounds {
                        Some(b) => b.union(ink),
                        None => ink,
                    });
                    Glyph::Simple(simple)
                }
                None => Glyph::Empty,
            };
            glyf_builder.add_glyph(&glyph)?;
        }

        let (glyf, loca, loca_format) = glyf_builder.build();

        let replaced = [
            Tag::new(b"glyf"),
            Tag::new(b"loca"),
            Tag::new(b"head"),
            Tag::new(b"maxp"),
            Tag::new(b"name"),
        ];
        let mut builder = FontBuilder::new();
        for record in self.inner.table_directory.table_records() {
            let tag = record.tag();
            if replaced.contains(&tag) {
                continue;
            }
            if let Some(table_data) = self.inner.table_data(tag) {
                builder.add_raw(tag, table_data);
            }
        }
        builder.add_table(&glyf)?;
        builder.add_table(&loca)?;

        let mut head: Head = self.inner.head()?.to_owned_table();
        head.index_to_loc_format = loca_format as i16;
        if let Some(b) = font_bounds {
            head.x_min = round_i16(b.min_x());
            head.y_min = round_i16(b.min_y());
            head.x_max = round_i16(b.max_x());
            head.y_max = round_i16(b.max_y());
        }
        builder.add_table(&head)?;

        // Every glyph is now a handful of straight-edged contours, so the
        // profile limits from the source outlines no longer apply.
        let mut maxp: Maxp = self.inner.maxp()?.to_owned_table();
        maxp.max_points = Some(max_points as u16);
        maxp.max_contours = Some(max_contours as u16);
        maxp.max_composite_points = Some(0);
        maxp.max_composite_contours = Some(0);
        maxp.max_size_of_instructions = Some(0);
        builder.add_table(&maxp)?;

        if let Ok(name) = self.inner.name() {
            let mut records = Vec::new();
            for record in name.name_record() {
                let id = record.name_id().to_u16();
                let current = match record.string(name.string_data()) {
                    Ok(s) => s.chars().collect::<String>(),
                    Err(_) => continue,
                };
                let new_string = match id {
                    1 | 4 | 6 | 16 => format!("{current}{suffix}"),
                    _ => current,
                };
                records.push(NameRecord::new(
                    record.platform_id(),
                    record.encoding_id(),
                    record.language_id(),
                    NameId::new(id),
                    new_string.into(),
                ));
            }
            builder.add_table(&Name::new(records))?;
        }

        info!("replaced {} glyph outlines", glyphs.len());
        Ok(builder.build())
    }
}

/// Round an outline into integer font units. Returns `None` for an empty
/// outline, which becomes an empty glyph.
fn simple_glyph(outline: &Outline) -> Option<SimpleGlyph> {
    let bounds = outline.bounds()?;
    let contours: Vec<Contour> = outline
        .contours()
        .iter()
        .map(|points| {
            Contour::from(
                points
                    .iter()
                    .map(|p| CurvePoint::new(round_i16(p.x), round_i16(p.y), true))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    Some(SimpleGlyph {
        bbox: Bbox {
            x_min: round_i16(bounds.min_x()),
            y_min: round_i16(bounds.min_y()),
            x_max: round_i16(bounds.max_x()),
            y_max: round_i16(bounds.max_y()),
        },
        contours,
        instructions: Vec::new(),
    })
}

fn round_i16(v: f64) -> i16 {
    v.round() as i16
}
