use tiled::{Color, Properties};

use super::{object::MapObject, tileset::Image};

/// One layer of a map, with the attributes every layer kind shares.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Tiled's layer ID (0 when the document predates layer IDs)
    pub id: u32,
    pub name: String,
    pub class: Option<String>,
    pub visible: bool,
    pub opacity: f32,
    /// Horizontal render offset in pixels
    pub offset_x: f32,
    /// Vertical render offset in pixels
    pub offset_y: f32,
    pub parallax_x: f32,
    pub parallax_y: f32,
    pub tint_color: Option<Color>,
    pub properties: Properties,
    pub kind: LayerKind,
}

impl Layer {
    /// A visible, fully opaque layer with no offset.
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: 0,
            name: name.into(),
            class: None,
            visible: true,
            opacity: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            parallax_x: 1.0,
            parallax_y: 1.0,
            tint_color: None,
            properties: Properties::new(),
            kind,
        }
    }

    /// Child layers when this is a group layer.
    pub fn children(&self) -> Option<&[Layer]> {
        match &self.kind {
            LayerKind::Group(group) => Some(&group.layers),
            _ => None,
        }
    }
}

/// The four layer kinds Tiled supports.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// `<layer>`
    Tiles(TileLayer),
    /// `<imagelayer>`
    Image(ImageLayer),
    /// `<objectgroup>`
    Objects(ObjectLayer),
    /// `<group>`
    Group(GroupLayer),
}

impl LayerKind {
    /// TMX element name for this kind.
    pub fn element_name(&self) -> &'static str {
        match self {
            LayerKind::Tiles(_) => "layer",
            LayerKind::Image(_) => "imagelayer",
            LayerKind::Objects(_) => "objectgroup",
            LayerKind::Group(_) => "group",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileLayer {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub data: TileData,
}

/// Tile grid payload of a tile layer.
///
/// Kept as written; the import pipeline never looks inside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileData {
    /// `csv`, `base64`, or `None` for plain XML `<tile>` elements
    pub encoding: Option<String>,
    /// `gzip`, `zlib` or `zstd` for base64 payloads
    pub compression: Option<String>,
    /// Raw text content of `<data>`
    pub text: String,
    /// Global tile IDs from `<tile gid="..">` children (XML encoding)
    pub tiles: Vec<u32>,
    /// Chunks of an infinite map
    pub chunks: Vec<Chunk>,
}

impl TileData {
    /// Decode the global tile IDs of a finite layer.
    ///
    /// Returns `None` for base64 payloads, which are left to the map processor.
    pub fn global_tile_ids(&self) -> Option<Vec<u32>> {
        match self.encoding.as_deref() {
            None => Some(self.tiles.clone()),
            Some("csv") => decode_csv(&self.text),
            Some(_) => None,
        }
    }
}

/// One chunk of an infinite tile layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub text: String,
    pub tiles: Vec<u32>,
}

pub(crate) fn decode_csv(text: &str) -> Option<Vec<u32>> {
    text.split(',')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.parse().ok())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageLayer {
    /// Image shown by the layer; Tiled omits it until one is chosen
    pub image: Option<Image>,
    pub repeat_x: bool,
    pub repeat_y: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectLayer {
    pub color: Option<Color>,
    pub draw_order: DrawOrder,
    pub objects: Vec<MapObject>,
}

/// Object draw order of an object layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawOrder {
    /// Sorted by y coordinate
    #[default]
    TopDown,
    /// Document order
    Index,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupLayer {
    pub layers: Vec<Layer>,
}
