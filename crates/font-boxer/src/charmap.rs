//! Character normalization and the code-to-character mapping table.

use deunicode::deunicode_char;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The catch-all canonical character.
pub const SPACE_PLACEHOLDER: char = ' ';

/// Last code point of Latin Extended-B; anything above is folded to ASCII
/// before classification.
const LATIN_EXTENDED_END: u32 = 591;

/// Reduce a code point to its canonical representative: a lowercase
/// letter, a digit, a symbol of interest, or the space placeholder.
///
/// Total and pure. Unencoded glyphs (`None`) and unassigned code points
/// collapse to the placeholder; non-Latin input is transliterated to its
/// closest ASCII approximation first.
pub fn normalize(codepoint: Option<u32>, symbols: &[char]) -> char {
    let Some(cp) = codepoint else {
        return SPACE_PLACEHOLDER;
    };
    let Some(raw) = char::from_u32(cp) else {
        return SPACE_PLACEHOLDER;
    };
    let c = if cp > LATIN_EXTENDED_END {
        simplify(raw)
    } else {
        raw
    };
    if c.is_alphabetic() {
        // Lu/Ll/Lt/Lm/Lo; lowercasing a cased letter in this range yields
        // a single char.
        return c.to_lowercase().next().unwrap_or(c);
    }
    if c.is_numeric() {
        return c;
    }
    if symbols.contains(&c) {
        return c;
    }
    SPACE_PLACEHOLDER
}

/// Best-effort ASCII folding, keeping the first character of the
/// transliteration ("ae" for "æ" becomes 'a').
fn simplify(c: char) -> char {
    deunicode_char(c)
        .and_then(|s| s.chars().next())
        .unwrap_or(SPACE_PLACEHOLDER)
}

/// Ordered, append-only table pairing table index with canonical
/// character. The index assigned to a character never changes, and the
/// same table is shared between the encoding and decoding sides.
///
/// Persists as an array of unsigned code points, index-in-array being the
/// binary code used by the grid encoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<u32>", try_from = "Vec<u32>")]
pub struct MappingTable {
    entries: IndexSet<char>,
}

impl MappingTable {
    /// Index assigned to `c` during the build pass.
    ///
    /// Failing here means the table was built from a different glyph set
    /// than the one being encoded; it is a contract violation, not a
    /// recoverable condition.
    pub fn index_of(&self, c: char) -> Result<usize> {
        self.entries
            .get_index_of(&c)
            .ok_or(Error::CharacterNotMapped(c))
    }

    /// Character at `index`, the decode direction.
    pub fn get(&self, index: usize) -> Option<char> {
        self.entries.get_index(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().copied()
    }

    /// The persisted form: code points in index order.
    pub fn code_points(&self) -> Vec<u32> {
        self.entries.iter().map(|&c| c as u32).collect()
    }
}

impl PartialEq for MappingTable {
    fn eq(&self, other: &Self) -> bool {
        // Order matters: two tables are equal only if they assign every
        // index identically.
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for MappingTable {}

impl From<MappingTable> for Vec<u32> {
    fn from(table: MappingTable) -> Self {
        table.code_points()
    }
}

impl TryFrom<Vec<u32>> for MappingTable {
    type Error = Error;

    fn try_from(code_points: Vec<u32>) -> Result<Self> {
        let mut entries = IndexSet::with_capacity(code_points.len());
        for cp in code_points {
            let c = char::from_u32(cp).ok_or(Error::InvalidCodepoint(cp))?;
            if !entries.insert(c) {
                return Err(Error::DuplicateMapping(c));
            }
        }
        Ok(Self { entries })
    }
}

/// Accumulates distinct canonical characters in first-encounter order.
///
/// An explicit value rather than ambient state, so one engine can process
/// several fonts without cross-contamination.
#[derive(Debug, Clone, Default)]
pub struct MappingTableBuilder {
    entries: IndexSet<char>,
}

impl MappingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `c` if unseen; returns the index it holds either way.
    pub fn add(&mut self, c: char) -> usize {
        self.entries.insert_full(c).0
    }

    pub fn finish(self) -> MappingTable {
        MappingTable {
            entries: self.entries,
        }
    }
}
