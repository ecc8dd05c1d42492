//! # `tiledmap_pipeline_format`
//!
//! Typed model and parser for Tiled map documents (.tmx).
//!
//! This is the data layer of the `tiledmap_pipeline` workspace: it turns raw
//! bytes into a [`MapDocument`] and nothing else. Reference paths are kept
//! verbatim; resolving them, tracking build dependencies and validating the
//! result is the job of `tiledmap_pipeline_import`.
//!
//! ```
//! use tiledmap_pipeline_format::{LayerKind, parse_map};
//!
//! let map = parse_map(br#"<map width="4" height="4" tilewidth="16" tileheight="16">
//!   <imagelayer name="sky"><image source="sky.png"/></imagelayer>
//! </map>"#).unwrap();
//!
//! assert_eq!(map.layers.len(), 1);
//! assert!(matches!(map.layers[0].kind, LayerKind::Image(_)));
//! ```

pub mod document;
pub mod parser;

pub use document::{
    Chunk, DrawOrder, GroupLayer, Image, ImageLayer, InlineTileset, Layer, LayerKind, MapDocument,
    MapObject, ObjectLayer, ObjectShape, Orientation, RenderOrder, TileData, TileLayer, TilesetRef,
};
pub use parser::{ParseError, parse_map};

/// Property types borrowed from the `tiled` crate.
pub use tiled::{Color, Properties, PropertyValue};

/// The document model, without the parser internals.
pub mod prelude {
    pub use crate::document::{
        GroupLayer, Image, ImageLayer, InlineTileset, Layer, LayerKind, MapDocument, MapObject,
        ObjectLayer, TileLayer, TilesetRef,
    };
    pub use crate::parser::{ParseError, parse_map};
}
