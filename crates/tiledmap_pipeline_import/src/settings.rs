//! Import settings, loadable from the JSON sidecar a build system keeps per
//! asset.
//!
//! ```
//! use tiledmap_pipeline_import::ImportSettings;
//!
//! let settings = ImportSettings::from_json_str(r#"{ "buildImages": true }"#).unwrap();
//! assert!(settings.build_images);
//! assert!(settings.build_tilesets);
//! ```

use serde::Deserialize;

use crate::context::ReferenceKind;

/// Which external references the importer builds through the registry.
///
/// Dependencies are always registered with the build context; these flags
/// only decide whether the referenced file is built as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportSettings {
    /// Build external tileset documents.
    pub build_tilesets: bool,

    /// Build object templates.
    pub build_templates: bool,

    /// Build tileset atlas images and image layer images.
    pub build_images: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            build_tilesets: true,
            build_templates: true,
            build_images: false,
        }
    }
}

impl ImportSettings {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn should_build(&self, kind: ReferenceKind) -> bool {
        match kind {
            ReferenceKind::Tileset => self.build_tilesets,
            ReferenceKind::Template => self.build_templates,
            ReferenceKind::TilesetImage | ReferenceKind::LayerImage => self.build_images,
        }
    }
}
