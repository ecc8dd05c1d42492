use std::path::PathBuf;

use tiled::{Color, Properties};

use super::{layer::Layer, tileset::TilesetRef};

/// A Tiled map (.tmx) as parsed from disk.
///
/// Reference paths (tileset sources, image sources, object templates) are kept
/// exactly as the editor wrote them until the importer rewrites them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    /// TMX format version (e.g. `"1.10"`)
    pub version: Option<String>,
    /// Version of the Tiled editor that saved the map
    pub tiled_version: Option<String>,
    pub class: Option<String>,
    pub orientation: Orientation,
    pub render_order: RenderOrder,

    /// Map width in tiles
    ///
    /// Kept wider than any sane map so oversized values reach validation
    /// instead of failing to parse.
    pub width: u64,
    /// Map height in tiles
    pub height: u64,
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    pub background_color: Option<Color>,
    pub next_layer_id: Option<u32>,
    pub next_object_id: Option<u32>,

    // ===== CONTENT (document order is draw order) =====
    pub tilesets: Vec<TilesetRef>,
    pub layers: Vec<Layer>,

    /// Custom properties set on the map in Tiled
    pub properties: Properties,

    /// Location the map was loaded from.
    ///
    /// Empty until the importer sets it; relative references inside the
    /// document resolve against its parent directory.
    pub file_path: PathBuf,
}

impl MapDocument {
    /// Total number of layers, including every layer nested inside groups.
    pub fn layer_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&[Layer]> = vec![&self.layers];
        while let Some(layers) = stack.pop() {
            count += layers.len();
            for layer in layers {
                if let Some(children) = layer.children() {
                    stack.push(children);
                }
            }
        }
        count
    }
}

/// Map projection, from the `orientation` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl Orientation {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "orthogonal" => Some(Self::Orthogonal),
            "isometric" => Some(Self::Isometric),
            "staggered" => Some(Self::Staggered),
            "hexagonal" => Some(Self::Hexagonal),
            _ => None,
        }
    }
}

/// Order in which tiles of a tile layer are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl RenderOrder {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "right-down" => Some(Self::RightDown),
            "right-up" => Some(Self::RightUp),
            "left-down" => Some(Self::LeftDown),
            "left-up" => Some(Self::LeftUp),
            _ => None,
        }
    }
}
