//! Map style rewriting.
//!
//! Plain dictionary mutation over a style document: point its symbol
//! layers at a derived font, strip decoration, and hide everything that
//! is not a label. No shared logic with the glyph engine.

use std::result;

use serde_json::{Value, json};

/// Layer types that render map graphics rather than labels.
const GRAPHIC_LAYER_TYPES: &[&str] = &[
    "fill",
    "line",
    "circle",
    "heatmap",
    "fill-extrusion",
    "raster",
    "background",
];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse style document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("style document has no '{0}' member")]
    MissingMember(&'static str),
}

pub type Result<T> = result::Result<T, Error>;

/// A mutable style document.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDoc {
    root: Value,
}

impl StyleDoc {
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(Self {
            root: serde_json::from_slice(data)?,
        })
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn set_name(&mut self, name: &str) {
        self.root["name"] = json!(name);
    }

    /// Point every symbol layer's text at `font`, and the glyph source at
    /// `glyphs_url` (a `{fontstack}`/`{range}` PBF template).
    pub fn set_font(&mut self, font: &str, glyphs_url: &str) -> Result<()> {
        self.root["glyphs"] = json!(glyphs_url);
        self.for_each_layer(|layer| layer_type(layer) == Some("symbol"), |layer| {
            layer["layout"]["text-font"] = json!([font]);
        })
    }

    /// Add `extra` em to each symbol layer's letter spacing, on top of
    /// whatever spacing the layer already sets.
    pub fn add_letter_spacing(&mut self, extra: f64) -> Result<()> {
        self.for_each_layer(|layer| layer_type(layer) == Some("symbol"), |layer| {
            let current = layer["layout"]["text-letter-spacing"]
                .as_f64()
                .unwrap_or(0.0);
            layer["layout"]["text-letter-spacing"] = json!(current + extra);
        })
    }

    /// Reduce labels to bare black text: no icons, no halo.
    pub fn undecorate_text(&mut self) -> Result<()> {
        self.for_each_layer(|layer| layer_type(layer) == Some("symbol"), |layer| {
            let paint = &mut layer["paint"];
            paint["icon-opacity"] = json!(0);
            paint["text-opacity"] = json!(1);
            paint["text-color"] = json!("hsla(0, 0%, 0%, 1)");
            paint["text-halo-color"] = json!("hsla(0, 0%, 0%, 0)");
        })
    }

    /// Hide every non-symbol layer.
    pub fn hide_graphics(&mut self) -> Result<()> {
        self.for_each_layer(
            |layer| layer_type(layer).is_some_and(|t| GRAPHIC_LAYER_TYPES.contains(&t)),
            |layer| {
                layer["layout"]["visibility"] = json!("none");
            },
        )
    }

    fn for_each_layer(
        &mut self,
        matches: impl Fn(&Value) -> bool,
        mut apply: impl FnMut(&mut Value),
    ) -> Result<()> {
        let layers = self.root["layers"]
            .as_array_mut()
            .ok_or(Error::MissingMember("layers"))?;
        for layer in layers.iter_mut().filter(|l| matches(l)) {
            apply(layer);
        }
        Ok(())
    }
}

fn layer_type(layer: &Value) -> Option<&str> {
    layer["type"].as_str()
}

/// One output style produced from a source document.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleVariant {
    /// Also the output file stem.
    pub name: String,
    pub doc: StyleDoc,
}

/// Derive the three standard variants: `full` (retargeted at `font` with
/// extra letter spacing), `label` (undecorated text only), and `box`
/// (label variant retargeted at the `-Box` font).
pub fn derive_variants(
    source: &StyleDoc,
    font: &str,
    glyphs_url: &str,
    extra_letter_spacing: f64,
) -> Result<Vec<StyleVariant>> {
    let mut full = source.clone();
    full.set_font(font, glyphs_url)?;
    full.add_letter_spacing(extra_letter_spacing)?;
    full.set_name("full");

    let mut label = full.clone();
    label.undecorate_text()?;
    label.hide_graphics()?;
    label.set_name("label");

    let mut boxed = label.clone();
    boxed.set_font(&format!("{font}-Box"), glyphs_url)?;
    boxed.set_name("box");

    Ok(vec![
        StyleVariant {
            name: "full".into(),
            doc: full,
        },
        StyleVariant {
            name: "label".into(),
            doc: label,
        },
        StyleVariant {
            name: "box".into(),
            doc: boxed,
        },
    ])
}
