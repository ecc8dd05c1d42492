use std::path::PathBuf;

use thiserror::Error;
use tiledmap_pipeline_format::MapDocument;

/// Largest width or height, in tiles, a map may have.
pub const MAX_MAP_DIMENSION: u64 = u16::MAX as u64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "The map '{}' is much too large ({width}x{height}). The maximum supported width and height for a Tiled map is {}.",
    .path.display(),
    MAX_MAP_DIMENSION
)]
pub struct OversizedMapError {
    pub path: PathBuf,
    pub width: u64,
    pub height: u64,
}

/// Check map-level limits once every reference has been reported.
pub fn validate(document: &MapDocument) -> Result<(), OversizedMapError> {
    if document.width > MAX_MAP_DIMENSION || document.height > MAX_MAP_DIMENSION {
        return Err(OversizedMapError {
            path: document.file_path.clone(),
            width: document.width,
            height: document.height,
        });
    }
    Ok(())
}
