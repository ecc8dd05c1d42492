use tiled::{Color, Properties};

/// How a map defines one of its tilesets.
///
/// A `<tileset>` element either points at a separate .tsx document or embeds
/// the tileset, in which case the tile atlas is an inline `<image>`. The two
/// are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum TilesetRef {
    /// Tileset stored in its own .tsx file
    External {
        /// First global tile ID of this tileset in the map
        first_gid: u32,
        /// Path to the .tsx file (raw until resolved)
        source: String,
    },
    /// Tileset embedded in the map, backed by a single atlas image
    Inline(InlineTileset),
}

impl TilesetRef {
    pub fn first_gid(&self) -> u32 {
        match self {
            TilesetRef::External { first_gid, .. } => *first_gid,
            TilesetRef::Inline(tileset) => tileset.first_gid,
        }
    }

    /// The path this tileset depends on: the .tsx source or the atlas image.
    pub fn reference(&self) -> &str {
        match self {
            TilesetRef::External { source, .. } => source,
            TilesetRef::Inline(tileset) => &tileset.image.source,
        }
    }
}

/// Tileset defined directly inside the map document.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineTileset {
    pub first_gid: u32,
    pub name: String,
    pub class: Option<String>,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Spacing between tiles in the atlas (pixels)
    pub spacing: u32,
    /// Margin around the atlas (pixels)
    pub margin: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub image: Image,
    pub properties: Properties,
}

/// Reference to an image file plus the metadata Tiled stores next to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    /// Path to the image (raw until resolved)
    pub source: String,
    /// Format hint for embedded image data (e.g. `"png"`)
    pub format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Color treated as transparent (`trans` attribute)
    pub transparent_color: Option<Color>,
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }
}
