//! # `tiledmap_pipeline_import`
//!
//! Build-time import of Tiled maps.
//!
//! Takes a [`MapDocument`](tiledmap_pipeline_format::MapDocument) from
//! `tiledmap_pipeline_format` and, in one synchronous pass:
//!
//! - rewrites every external reference (tilesets, tileset images, layer
//!   images, object templates) to a canonical path
//! - registers each reference as a build dependency
//! - builds external references through a per-import registry
//! - validates map limits
//!
//! The surrounding build system plugs in through [`BuildContext`].
//!
//! ```
//! use tiledmap_pipeline_import::{RecordingContext, TiledMapImporter};
//!
//! let xml = br#"<map width="8" height="8" tilewidth="16" tileheight="16">
//!   <tileset firstgid="1" source="terrain.tsx"/>
//! </map>"#;
//!
//! let mut context = RecordingContext::default();
//! let imported = TiledMapImporter::default()
//!     .import_bytes("maps/level.tmx", xml, &mut context)
//!     .unwrap();
//!
//! assert_eq!(imported.dependencies().len(), 1);
//! assert_eq!(context.builds.len(), 1);
//! ```

pub mod context;
pub mod importer;
pub mod registry;
pub mod resolve;
pub mod settings;
pub mod validate;
pub mod walk;

pub use context::{
    ArtifactId, BuildContext, BuildError, BuildRequest, ExternalReferenceHandle, RecordingContext,
    ReferenceKind,
};
pub use importer::{ImportError, ImportErrorKind, ImportStage, ImportedMap, TiledMapImporter};
pub use registry::ExternalReferenceRegistry;
pub use resolve::{InvalidPathError, resolve};
pub use settings::ImportSettings;
pub use validate::{MAX_MAP_DIMENSION, OversizedMapError, validate};
pub use walk::{resolve_tilesets, walk_layers};

/// Commonly used types for running an import.
pub mod prelude {
    pub use crate::context::{BuildContext, BuildError, ExternalReferenceHandle, ReferenceKind};
    pub use crate::importer::{ImportError, ImportedMap, TiledMapImporter};
    pub use crate::settings::ImportSettings;
}
