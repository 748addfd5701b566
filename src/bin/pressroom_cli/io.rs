#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;

use pressroom::domain::blocks::Block;

use crate::error::CliError;

pub fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::InputFile {
        path: path.display().to_string(),
        source,
    })
}

/// Parse a JSON block array from a file, as exported by `pages get`.
pub fn read_blocks(path: &Path) -> Result<Vec<Block>, CliError> {
    let data = fs::read_to_string(path).map_err(|source| CliError::InputFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&data)
        .map_err(|e| CliError::InvalidInput(format!("{}: {e}", path.display())))
}

/// Content type for an artwork upload, keyed on the file extension.
pub fn artwork_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
