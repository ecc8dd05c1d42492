//! # `tiledmap_pipeline`
//!
//! Content pipeline importer for maps authored in the Tiled editor.
//!
//! This is a meta-crate that combines the `tiledmap_pipeline_*` sub-crates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tiledmap_pipeline::prelude::*;
//! use tiledmap_pipeline::import::RecordingContext;
//!
//! let mut context = RecordingContext::default();
//! let imported = TiledMapImporter::default()
//!     .import("assets/maps/level1.tmx", &mut context)
//!     .unwrap();
//!
//! for dependency in imported.dependencies() {
//!     println!("{}", dependency.display());
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Layer 1** ([`format`]): typed TMX document model and parser
//! - **Layer 2** ([`import`]): reference resolution, dependency tracking,
//!   external reference builds and validation
//!
//! A build system integrates by implementing
//! [`BuildContext`](import::BuildContext) and handing it to
//! [`TiledMapImporter`](import::TiledMapImporter).

pub use tiledmap_pipeline_format as format;
pub use tiledmap_pipeline_import as import;

/// Unified prelude for `tiledmap_pipeline`
pub mod prelude {
    pub use crate::format::prelude::*;
    pub use crate::import::prelude::*;
}
