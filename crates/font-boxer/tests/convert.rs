//! End-to-end conversion tests over fonts built in memory.

use codebox_font_boxer::{BoxMode, Error, Font, MappingTable, Options, code_font, direction_font};
use read_fonts::{FontRef, TableProvider, tables::glyf::Glyph, types::GlyphId};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{Bbox, Contour, GlyfLocaBuilder, Glyph as WriteGlyph, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        name::{Name, NameRecord},
        post::Post,
    },
    types::NameId,
};

const ASCENT: i16 = 800;
const DESCENT: i16 = -200;
const UNDERLINE: i16 = -100;

struct TestGlyph {
    advance: u16,
    /// Ink rectangle, or `None` for a blank glyph.
    ink: Option<(i16, i16, i16, i16)>,
    codepoint: Option<char>,
}

impl TestGlyph {
    fn new(advance: u16, ink: Option<(i16, i16, i16, i16)>, codepoint: Option<char>) -> Self {
        Self {
            advance,
            ink,
            codepoint,
        }
    }
}

/// Assemble a minimal TrueType font: one rectangle contour per inked
/// glyph, per-glyph advances, cmap entries for encoded glyphs.
fn make_test_font(glyphs: &[TestGlyph]) -> Vec<u8> {
    let mut glyf_builder = GlyfLocaBuilder::new();
    for g in glyphs {
        let glyph = match g.ink {
            Some((x_min, y_min, x_max, y_max)) => {
                let points = vec![
                    read_fonts::tables::glyf::CurvePoint::new(x_min, y_min, true),
                    read_fonts::tables::glyf::CurvePoint::new(x_min, y_max, true),
                    read_fonts::tables::glyf::CurvePoint::new(x_max, y_max, true),
                    read_fonts::tables::glyf::CurvePoint::new(x_max, y_min, true),
                ];
                WriteGlyph::Simple(SimpleGlyph {
                    bbox: Bbox {
                        x_min,
                        y_min,
                        x_max,
                        y_max,
                    },
                    contours: vec![Contour::from(points)],
                    instructions: vec![],
                })
            }
            None => WriteGlyph::Empty,
        };
        glyf_builder.add_glyph(&glyph).expect("glyph");
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let mut cmap_mappings: Vec<_> = glyphs
        .iter()
        .enumerate()
        .filter_map(|(gid, g)| g.codepoint.map(|c| (c, GlyphId::new(gid as u32))))
        .collect();
    cmap_mappings.sort_by_key(|&(c, _)| c);
    let cmap = Cmap::from_mappings(cmap_mappings).expect("cmap");

    let head = Head {
        font_revision: font_types::Fixed::from_f64(1.0),
        checksum_adjustment: 0,
        magic_number: 0x5F0F3CF5,
        flags: write_fonts::tables::head::Flags::empty(),
        units_per_em: 1000,
        created: font_types::LongDateTime::new(0),
        modified: font_types::LongDateTime::new(0),
        x_min: 0,
        y_min: DESCENT,
        x_max: 1000,
        y_max: ASCENT,
        mac_style: write_fonts::tables::head::MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            write_fonts::tables::loca::LocaFormat::Short => 0,
            write_fonts::tables::loca::LocaFormat::Long => 1,
        },
    };

    let hhea = Hhea {
        ascender: font_types::FWord::new(ASCENT),
        descender: font_types::FWord::new(DESCENT),
        line_gap: font_types::FWord::new(0),
        advance_width_max: font_types::UfWord::new(1000),
        min_left_side_bearing: font_types::FWord::new(0),
        min_right_side_bearing: font_types::FWord::new(0),
        x_max_extent: font_types::FWord::new(1000),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: glyphs.len() as u16,
    };

    let hmtx = Hmtx {
        h_metrics: glyphs
            .iter()
            .map(|g| LongMetric {
                advance: g.advance,
                side_bearing: 0,
            })
            .collect(),
        left_side_bearings: vec![],
    };

    let maxp = Maxp {
        num_glyphs: glyphs.len() as u16,
        max_points: Some(4),
        max_contours: Some(1),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    };

    let post = Post {
        version: font_types::Version16Dot16::VERSION_3_0,
        italic_angle: font_types::Fixed::from_f64(0.0),
        underline_position: font_types::FWord::new(UNDERLINE),
        underline_thickness: font_types::FWord::new(50),
        is_fixed_pitch: 1,
        min_mem_type42: 0,
        max_mem_type42: 0,
        min_mem_type1: 0,
        max_mem_type1: 0,
        num_glyphs: Some(glyphs.len() as u16),
        glyph_name_index: None,
        string_data: None,
    };

    let name = Name::new(vec![
        NameRecord::new(3, 1, 0x409, NameId::new(1), "Mono Test".to_string().into()),
        NameRecord::new(3, 1, 0x409, NameId::new(4), "Mono Test".to_string().into()),
        NameRecord::new(3, 1, 0x409, NameId::new(6), "MonoTest".to_string().into()),
    ]);

    let mut builder = FontBuilder::new();
    builder.add_table(&head).expect("head");
    builder.add_table(&hhea).expect("hhea");
    builder.add_table(&hmtx).expect("hmtx");
    builder.add_table(&maxp).expect("maxp");
    builder.add_table(&cmap).expect("cmap");
    builder.add_table(&post).expect("post");
    builder.add_table(&name).expect("name");
    builder.add_table(&glyf).expect("glyf");
    builder.add_table(&loca).expect("loca");
    builder.build()
}

/// notdef, A, a narrow bar, and a blank space; all advances 1000 so the
/// derived thresholds are width 650..900, height 490..700.
fn monospace_fixture() -> Vec<u8> {
    make_test_font(&[
        TestGlyph::new(1000, Some((50, 0, 950, 700)), None),
        TestGlyph::new(1000, Some((100, 0, 900, 650)), Some('A')),
        TestGlyph::new(1000, Some((450, 0, 550, 600)), Some('i')),
        TestGlyph::new(1000, None, Some(' ')),
    ])
}

fn glyph_bbox(data: &[u8], gid: u32) -> Option<(i16, i16, i16, i16)> {
    let font = FontRef::new(data).expect("parse");
    let glyf = font.glyf().expect("glyf");
    let loca = font.loca(None).expect("loca");
    match loca.get_glyf(GlyphId::new(gid), &glyf).expect("get_glyf") {
        Some(Glyph::Simple(g)) => Some((g.x_min(), g.y_min(), g.x_max(), g.y_max())),
        Some(Glyph::Composite(g)) => Some((g.x_min(), g.y_min(), g.x_max(), g.y_max())),
        None => None,
    }
}

fn glyph_point_count(data: &[u8], gid: u32) -> Option<(usize, usize)> {
    let font = FontRef::new(data).expect("parse");
    let glyf = font.glyf().expect("glyf");
    let loca = font.loca(None).expect("loca");
    match loca.get_glyf(GlyphId::new(gid), &glyf).expect("get_glyf") {
        Some(Glyph::Simple(g)) => Some((
            g.end_pts_of_contours().len(),
            g.points().count(),
        )),
        _ => None,
    }
}

#[test]
fn test_direction_font_brackets_every_glyph() {
    let data = monospace_fixture();
    let boxed = direction_font(&data, &Options::default()).expect("convert");

    // Comfortable glyphs keep their ink box, brackets have 8 vertices.
    assert_eq!(glyph_bbox(&boxed, 0), Some((50, 0, 950, 700)));
    assert_eq!(glyph_bbox(&boxed, 1), Some((100, 0, 900, 650)));
    for gid in 0..4 {
        assert_eq!(glyph_point_count(&boxed, gid), Some((1, 8)), "gid {gid}");
    }

    // The narrow bar expands to the minimum width, symmetrically.
    assert_eq!(glyph_bbox(&boxed, 2), Some((175, 0, 825, 600)));

    // The blank glyph gets a minimum box centered in advance and ascent.
    assert_eq!(glyph_bbox(&boxed, 3), Some((175, 155, 825, 645)));
}

#[test]
fn test_direction_font_preserves_advances() {
    let data = monospace_fixture();
    let boxed = direction_font(&data, &Options::default()).expect("convert");

    let font = FontRef::new(&boxed).expect("parse");
    let hmtx = font.hmtx().expect("hmtx");
    for gid in 0..4 {
        assert_eq!(hmtx.advance(GlyphId::new(gid)), Some(1000), "gid {gid}");
    }
}

#[test]
fn test_direction_font_refreshes_head_bounds() {
    let data = monospace_fixture();
    let boxed = direction_font(&data, &Options::default()).expect("convert");

    let font = FontRef::new(&boxed).expect("parse");
    let head = font.head().expect("head");
    assert_eq!(head.x_min(), 50);
    assert_eq!(head.y_min(), 0);
    assert_eq!(head.x_max(), 950);
    assert_eq!(head.y_max(), 700);
}

#[test]
fn test_direction_font_suffixes_names() {
    let data = monospace_fixture();
    let boxed = direction_font(&data, &Options::default()).expect("convert");

    let font = FontRef::new(&boxed).expect("parse");
    let name = font.name().expect("name");
    let strings: Vec<String> = name
        .name_record()
        .iter()
        .filter_map(|r| r.string(name.string_data()).ok())
        .map(|s| s.chars().collect())
        .collect();
    assert!(strings.contains(&"Mono Test-Box".to_string()), "{strings:?}");
    assert!(strings.contains(&"MonoTest-Box".to_string()), "{strings:?}");
}

#[test]
fn test_code_font_encodes_mapping_indices() {
    let data = make_test_font(&[
        TestGlyph::new(1000, Some((50, 0, 950, 700)), None),
        TestGlyph::new(1000, Some((100, 0, 900, 650)), Some('A')),
        TestGlyph::new(1000, Some((100, 0, 900, 650)), Some('B')),
        TestGlyph::new(1000, Some((100, 0, 900, 600)), Some('a')),
        TestGlyph::new(1000, None, Some(' ')),
    ]);
    let (coded, table) = code_font(&data, &Options::default()).expect("convert");

    // First-encounter order: notdef -> space, A -> a, B -> b; 'a' and the
    // space glyph reuse existing entries.
    assert_eq!(table.code_points(), vec![0x20, 0x61, 0x62]);

    // notdef encodes index 0: a blank glyph.
    assert_eq!(glyph_bbox(&coded, 0), None);

    // 'A' encodes index 1: one block at the top-left cell of the uniform
    // box (advance 1000 -> x 50..950, full -200..800 band, cells 450x250).
    assert_eq!(glyph_bbox(&coded, 1), Some((50, 550, 500, 800)));

    // 'B' encodes index 2: one block at the top-right cell.
    assert_eq!(glyph_bbox(&coded, 2), Some((500, 550, 950, 800)));

    // 'a' shares A's code.
    assert_eq!(glyph_bbox(&coded, 3), Some((50, 550, 500, 800)));
}

#[test]
fn test_code_font_and_companion_boxes_superimpose() {
    let data = monospace_fixture();
    let options = Options::default();
    let font = Font::new(&data).expect("parse");

    let companion = font
        .to_direction_boxes(BoxMode::Uniform, &options)
        .expect("convert");

    // Uniform boxes ignore the ink: every glyph gets the same bounds.
    for gid in 0..4 {
        assert_eq!(
            glyph_bbox(&companion, gid),
            Some((50, DESCENT, 950, ASCENT)),
            "gid {gid}"
        );
    }
}

#[test]
fn test_mapping_table_round_trips_through_json() {
    let data = monospace_fixture();
    let (_, table) = code_font(&data, &Options::default()).expect("convert");

    let json = serde_json::to_string(&table).expect("serialize");
    let restored: MappingTable = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, table);
    for (i, c) in table.iter().enumerate() {
        assert_eq!(restored.index_of(c).unwrap(), i);
    }
}

#[test]
fn test_code_overflow_aborts_before_output() {
    let data = make_test_font(&[
        TestGlyph::new(1000, Some((50, 0, 950, 700)), None),
        TestGlyph::new(1000, Some((100, 0, 900, 650)), Some('A')),
        TestGlyph::new(1000, Some((100, 0, 900, 650)), Some('B')),
    ]);
    // A 1x1 grid holds one bit; index 2 cannot be encoded.
    let options = Options::default().with_grid(1, 1);
    let result = code_font(&data, &options);
    assert!(matches!(result, Err(Error::IndexOverflow { index: 2, .. })));
}

#[test]
fn test_zero_advance_font_rejected() {
    let data = make_test_font(&[TestGlyph::new(0, Some((0, 0, 100, 100)), None)]);
    let result = direction_font(&data, &Options::default());
    assert!(matches!(result, Err(Error::BadThresholds { .. })));
}
