//! Shared file I/O helpers.

use std::{
    fs::{create_dir_all, read, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub fn read_font(path: &Path) -> Result<Vec<u8>> {
    read(path).with_context(|| format!("Failed to read font: {}", path.display()))
}

pub fn write_font(path: &Path, data: impl AsRef<[u8]>) -> Result<()> {
    write(path, data).with_context(|| format!("Failed to write font: {}", path.display()))
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// `input.ttf` with suffix `-Box` becomes `input-Box.ttf`.
pub fn file_name_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("font");
    let ext = input
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("ttf");
    PathBuf::from(format!("{stem}{suffix}.{ext}"))
}
