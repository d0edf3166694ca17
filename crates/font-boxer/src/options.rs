//! Conversion configuration.

/// Punctuation kept as-is by the normalizer instead of collapsing to space.
pub const DEFAULT_SYMBOLS: &[char] = &[
    '(', ')', '[', ']', '&', '%', '$', '@', '!', '.', ',', '-', '*', '?', '{', '}', ':', ';', '\'',
];

/// How to handle a raw bounding box wider than the maximum box width.
///
/// The historical behavior truncates toward the origin rather than
/// re-centering, which differs from the symmetric policy used for every
/// other adjustment. Tests pin `ClampToOrigin`; switch to `Recenter` only
/// as a deliberate behavior change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidthShrinkPolicy {
    /// Floor the left edge at 0 and cap the right edge at the maximum
    /// box width, independently.
    #[default]
    ClampToOrigin,
    /// Center a maximum-width box on the raw box's midpoint.
    Recenter,
}

/// Options controlling box sizing, code layout, and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Rows in the code grid.
    pub grid_rows: u32,
    /// Columns in the code grid.
    pub grid_cols: u32,
    /// Maximum box width as a fraction of the reference advance width.
    /// Also sizes the uniform box relative to each glyph's advance.
    pub width_shrink_factor: f64,
    /// Minimum box width as a fraction of the reference advance width.
    pub width_expand_factor: f64,
    /// Minimum box height as a fraction of the maximum observed glyph height.
    pub height_expand_factor: f64,
    /// Characters the normalizer passes through unchanged.
    pub symbols_of_interest: Vec<char>,
    pub width_shrink_policy: WidthShrinkPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            grid_rows: 4,
            grid_cols: 2,
            width_shrink_factor: 0.9,
            width_expand_factor: 1.3 / 2.0,
            height_expand_factor: 0.7,
            symbols_of_interest: DEFAULT_SYMBOLS.to_vec(),
            width_shrink_policy: WidthShrinkPolicy::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bit capacity of the code grid.
    pub fn grid_capacity(&self) -> u32 {
        self.grid_rows * self.grid_cols
    }

    pub fn with_grid(mut self, rows: u32, cols: u32) -> Self {
        self.grid_rows = rows;
        self.grid_cols = cols;
        self
    }

    pub fn with_width_shrink_factor(mut self, factor: f64) -> Self {
        self.width_shrink_factor = factor;
        self
    }

    pub fn with_width_expand_factor(mut self, factor: f64) -> Self {
        self.width_expand_factor = factor;
        self
    }

    pub fn with_height_expand_factor(mut self, factor: f64) -> Self {
        self.height_expand_factor = factor;
        self
    }

    pub fn with_symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.symbols_of_interest = symbols.into_iter().collect();
        self
    }

    pub fn with_width_shrink_policy(mut self, policy: WidthShrinkPolicy) -> Self {
        self.width_shrink_policy = policy;
        self
    }
}
