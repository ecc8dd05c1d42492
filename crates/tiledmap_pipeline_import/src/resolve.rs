//! Rewriting editor-relative reference paths into canonical paths.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A resolved reference could not be stored back into the document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid UTF-8 in resolved path: {}", .path.display())]
pub struct InvalidPathError {
    pub path: PathBuf,
}

/// Resolve `raw_reference` against the directory of the importing map.
///
/// This is a plain [`Path::join`]: no existence check and no normalization,
/// so `..` and `.` segments survive for the build system to interpret. An
/// absolute `raw_reference` replaces the base, as `join` does.
pub fn resolve(base_directory: &Path, raw_reference: &str) -> PathBuf {
    base_directory.join(raw_reference)
}

/// Resolve the reference stored in `field` and write the canonical form back.
pub(crate) fn rewrite_in_place(
    field: &mut String,
    base_directory: &Path,
) -> Result<PathBuf, InvalidPathError> {
    let resolved = resolve(base_directory, field);
    let Some(text) = resolved.to_str() else {
        return Err(InvalidPathError { path: resolved });
    };
    *field = text.to_string();
    Ok(resolved)
}
