//! Typed TMX entity tree: map → tilesets → layers → nested layers/objects.

pub mod layer;
pub mod map;
pub mod object;
pub mod tileset;

pub use layer::{
    Chunk, DrawOrder, GroupLayer, ImageLayer, Layer, LayerKind, ObjectLayer, TileData, TileLayer,
};
pub use map::{MapDocument, Orientation, RenderOrder};
pub use object::{MapObject, ObjectShape};
pub use tileset::{Image, InlineTileset, TilesetRef};
