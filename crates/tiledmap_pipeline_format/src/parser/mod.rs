//! TMX document parser.
//!
//! Parsing happens in two steps: [`xml`] turns the markup into a generic
//! element tree, then this module maps elements onto the typed
//! [`MapDocument`](crate::document::MapDocument) model. Document order of
//! tilesets, layers and objects is preserved at every level.

mod properties;
mod xml;

use std::str::FromStr;

use thiserror::Error;
use tiled::Color;

use crate::document::{
    Chunk, DrawOrder, GroupLayer, Image, ImageLayer, InlineTileset, Layer, LayerKind, MapDocument,
    MapObject, ObjectLayer, ObjectShape, Orientation, RenderOrder, TileData, TileLayer, TilesetRef,
};
use properties::parse_properties;
use xml::{Element, read_tree};

/// Errors produced while turning a TMX document into a [`MapDocument`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    #[error("Expected a single <map> root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("<{element}> is missing required child <{child}>")]
    MissingElement { element: String, child: String },

    #[error("Invalid value {value:?} for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("Unknown layer kind <{0}>")]
    UnknownLayerKind(String),
}

pub(crate) fn invalid(element: &str, attribute: &str, value: &str) -> ParseError {
    ParseError::InvalidAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

/// Non-layer elements allowed between the layers of a `<map>`.
const MAP_SECTIONS: &[&str] = &["properties", "tileset", "editorsettings"];
/// Non-layer elements allowed between the layers of a `<group>`.
const GROUP_SECTIONS: &[&str] = &["properties"];

/// Parse raw TMX bytes into a [`MapDocument`].
///
/// The returned document has an empty `file_path`; the caller records where
/// the bytes came from.
pub fn parse_map(bytes: &[u8]) -> Result<MapDocument, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    // Editors on Windows may prepend a byte order mark
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let root = read_tree(text)?;
    map_from_element(&root)
}

fn map_from_element(map: &Element) -> Result<MapDocument, ParseError> {
    if map.name != "map" {
        return Err(ParseError::UnexpectedRoot(map.name.clone()));
    }

    let orientation = match map.attribute("orientation") {
        Some(value) => {
            Orientation::from_attribute(value).ok_or_else(|| invalid("map", "orientation", value))?
        }
        None => Orientation::default(),
    };
    let render_order = match map.attribute("renderorder") {
        Some(value) => {
            RenderOrder::from_attribute(value).ok_or_else(|| invalid("map", "renderorder", value))?
        }
        None => RenderOrder::default(),
    };

    let tilesets = map
        .children_named("tileset")
        .map(parse_tileset)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MapDocument {
        version: map.attribute("version").map(ToString::to_string),
        tiled_version: map.attribute("tiledversion").map(ToString::to_string),
        class: map.attribute("class").map(ToString::to_string),
        orientation,
        render_order,
        width: required(map, "width")?,
        height: required(map, "height")?,
        tile_width: required(map, "tilewidth")?,
        tile_height: required(map, "tileheight")?,
        infinite: flag(map, "infinite", false)?,
        background_color: color(map, "backgroundcolor")?,
        next_layer_id: optional(map, "nextlayerid")?,
        next_object_id: optional(map, "nextobjectid")?,
        tilesets,
        layers: parse_layers(map, MAP_SECTIONS)?,
        properties: parse_properties(map)?,
        file_path: Default::default(),
    })
}

/// A non-blank `source` wins over an inline `<image>`; only one of the two
/// ever reaches the document.
fn parse_tileset(tileset: &Element) -> Result<TilesetRef, ParseError> {
    let first_gid = required(tileset, "firstgid")?;

    if let Some(source) = tileset.attribute("source")
        && !source.trim().is_empty()
    {
        return Ok(TilesetRef::External {
            first_gid,
            source: source.to_string(),
        });
    }

    let image = tileset
        .child("image")
        .ok_or_else(|| ParseError::MissingElement {
            element: "tileset".to_string(),
            child: "image".to_string(),
        })?;

    Ok(TilesetRef::Inline(InlineTileset {
        first_gid,
        name: tileset.attribute("name").unwrap_or_default().to_string(),
        class: tileset.attribute("class").map(ToString::to_string),
        tile_width: required(tileset, "tilewidth")?,
        tile_height: required(tileset, "tileheight")?,
        spacing: optional(tileset, "spacing")?.unwrap_or(0),
        margin: optional(tileset, "margin")?.unwrap_or(0),
        tile_count: optional(tileset, "tilecount")?.unwrap_or(0),
        columns: optional(tileset, "columns")?.unwrap_or(0),
        image: parse_image(image)?,
        properties: parse_properties(tileset)?,
    }))
}

fn parse_image(image: &Element) -> Result<Image, ParseError> {
    Ok(Image {
        source: image.attribute("source").unwrap_or_default().to_string(),
        format: image.attribute("format").map(ToString::to_string),
        width: optional(image, "width")?,
        height: optional(image, "height")?,
        transparent_color: color(image, "trans")?,
    })
}

/// A `<map>` or `<group>` whose layer children are still being converted.
struct LayerFrame<'a> {
    element: &'a Element,
    children: std::slice::Iter<'a, Element>,
    sections: &'static [&'static str],
    layers: Vec<Layer>,
}

impl<'a> LayerFrame<'a> {
    fn new(element: &'a Element, sections: &'static [&'static str]) -> Self {
        Self {
            element,
            children: element.children.iter(),
            sections,
            layers: Vec::new(),
        }
    }
}

/// Parse every layer child of `parent`, skipping the listed section elements.
///
/// Groups are opened on an explicit stack and turned into a [`Layer`] once
/// all of their children are done, so nesting depth does not grow the call
/// stack.
fn parse_layers(
    parent: &Element,
    sections: &'static [&'static str],
) -> Result<Vec<Layer>, ParseError> {
    let mut root = LayerFrame::new(parent, sections);
    let mut open: Vec<LayerFrame<'_>> = Vec::new();

    loop {
        let frame = open.last_mut().unwrap_or(&mut root);
        let Some(child) = frame.children.next() else {
            let Some(finished) = open.pop() else {
                return Ok(root.layers);
            };
            let group = layer_from_element(
                finished.element,
                LayerKind::Group(GroupLayer {
                    layers: finished.layers,
                }),
            )?;
            open.last_mut().unwrap_or(&mut root).layers.push(group);
            continue;
        };

        if frame.sections.contains(&child.name.as_str()) {
            continue;
        }
        if child.name == "group" {
            open.push(LayerFrame::new(child, GROUP_SECTIONS));
            continue;
        }
        let layer = parse_layer(child)?;
        frame.layers.push(layer);
    }
}

fn parse_layer(layer: &Element) -> Result<Layer, ParseError> {
    let kind = match layer.name.as_str() {
        "layer" => LayerKind::Tiles(parse_tile_layer(layer)?),
        "imagelayer" => LayerKind::Image(ImageLayer {
            image: layer.child("image").map(parse_image).transpose()?,
            repeat_x: flag(layer, "repeatx", false)?,
            repeat_y: flag(layer, "repeaty", false)?,
        }),
        "objectgroup" => LayerKind::Objects(parse_object_layer(layer)?),
        // Groups are assembled by `parse_layers`
        other => return Err(ParseError::UnknownLayerKind(other.to_string())),
    };
    layer_from_element(layer, kind)
}

/// Attach the attributes every layer kind shares to `kind`.
fn layer_from_element(layer: &Element, kind: LayerKind) -> Result<Layer, ParseError> {
    Ok(Layer {
        id: optional(layer, "id")?.unwrap_or(0),
        name: layer.attribute("name").unwrap_or_default().to_string(),
        class: layer.attribute("class").map(ToString::to_string),
        visible: flag(layer, "visible", true)?,
        opacity: optional(layer, "opacity")?.unwrap_or(1.0),
        offset_x: optional(layer, "offsetx")?.unwrap_or(0.0),
        offset_y: optional(layer, "offsety")?.unwrap_or(0.0),
        parallax_x: optional(layer, "parallaxx")?.unwrap_or(1.0),
        parallax_y: optional(layer, "parallaxy")?.unwrap_or(1.0),
        tint_color: color(layer, "tintcolor")?,
        properties: parse_properties(layer)?,
        kind,
    })
}

fn parse_tile_layer(layer: &Element) -> Result<TileLayer, ParseError> {
    let data = match layer.child("data") {
        Some(data) => TileData {
            encoding: data.attribute("encoding").map(ToString::to_string),
            compression: data.attribute("compression").map(ToString::to_string),
            text: data.text.clone(),
            tiles: parse_tile_gids(data)?,
            chunks: data
                .children_named("chunk")
                .map(|chunk| -> Result<Chunk, ParseError> {
                    Ok(Chunk {
                        x: required(chunk, "x")?,
                        y: required(chunk, "y")?,
                        width: required(chunk, "width")?,
                        height: required(chunk, "height")?,
                        text: chunk.text.clone(),
                        tiles: parse_tile_gids(chunk)?,
                    })
                })
                .collect::<Result<_, ParseError>>()?,
        },
        None => TileData::default(),
    };

    Ok(TileLayer {
        x: optional(layer, "x")?.unwrap_or(0),
        y: optional(layer, "y")?.unwrap_or(0),
        width: required(layer, "width")?,
        height: required(layer, "height")?,
        data,
    })
}

fn parse_tile_gids(data: &Element) -> Result<Vec<u32>, ParseError> {
    data.children_named("tile")
        .map(|tile| -> Result<u32, ParseError> { Ok(optional(tile, "gid")?.unwrap_or(0)) })
        .collect()
}

fn parse_object_layer(layer: &Element) -> Result<ObjectLayer, ParseError> {
    let draw_order = match layer.attribute("draworder") {
        None | Some("topdown") => DrawOrder::TopDown,
        Some("index") => DrawOrder::Index,
        Some(other) => return Err(invalid("objectgroup", "draworder", other)),
    };

    Ok(ObjectLayer {
        color: color(layer, "color")?,
        draw_order,
        objects: layer
            .children_named("object")
            .map(parse_object)
            .collect::<Result<_, _>>()?,
    })
}

fn parse_object(object: &Element) -> Result<MapObject, ParseError> {
    let shape = if object.child("ellipse").is_some() {
        ObjectShape::Ellipse
    } else if object.child("point").is_some() {
        ObjectShape::Point
    } else if let Some(polygon) = object.child("polygon") {
        ObjectShape::Polygon(parse_points(polygon)?)
    } else if let Some(polyline) = object.child("polyline") {
        ObjectShape::Polyline(parse_points(polyline)?)
    } else if let Some(text) = object.child("text") {
        ObjectShape::Text(text.text.clone())
    } else {
        ObjectShape::Rectangle
    };

    // `type` was renamed to `class` in Tiled 1.9
    let class = object
        .attribute("class")
        .or_else(|| object.attribute("type"))
        .unwrap_or_default();

    Ok(MapObject {
        id: optional(object, "id")?.unwrap_or(0),
        name: object.attribute("name").unwrap_or_default().to_string(),
        class: class.to_string(),
        x: optional(object, "x")?.unwrap_or(0.0),
        y: optional(object, "y")?.unwrap_or(0.0),
        width: optional(object, "width")?.unwrap_or(0.0),
        height: optional(object, "height")?.unwrap_or(0.0),
        rotation: optional(object, "rotation")?.unwrap_or(0.0),
        gid: optional(object, "gid")?,
        visible: flag(object, "visible", true)?,
        template: object.attribute("template").map(ToString::to_string),
        shape,
        properties: parse_properties(object)?,
    })
}

/// Parse a `points="x1,y1 x2,y2 ..."` attribute.
fn parse_points(element: &Element) -> Result<Vec<(f32, f32)>, ParseError> {
    let raw: &str = required(element, "points")?;
    raw.split_whitespace()
        .map(|pair| -> Result<(f32, f32), ParseError> {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| invalid(&element.name, "points", raw))?;
            let x = x.parse().map_err(|_| invalid(&element.name, "points", raw))?;
            let y = y.parse().map_err(|_| invalid(&element.name, "points", raw))?;
            Ok((x, y))
        })
        .collect()
}

// ===== ATTRIBUTE HELPERS =====

fn required<'a, T: FromAttribute<'a>>(element: &'a Element, key: &str) -> Result<T, ParseError> {
    optional(element, key)?.ok_or_else(|| ParseError::MissingAttribute {
        element: element.name.clone(),
        attribute: key.to_string(),
    })
}

fn optional<'a, T: FromAttribute<'a>>(
    element: &'a Element,
    key: &str,
) -> Result<Option<T>, ParseError> {
    element
        .attribute(key)
        .map(|value| T::from_attribute(value).ok_or_else(|| invalid(&element.name, key, value)))
        .transpose()
}

/// Tiled writes booleans as `0`/`1`.
fn flag(element: &Element, key: &str, default: bool) -> Result<bool, ParseError> {
    match element.attribute(key) {
        None => Ok(default),
        Some("1" | "true") => Ok(true),
        Some("0" | "false") => Ok(false),
        Some(other) => Err(invalid(&element.name, key, other)),
    }
}

fn color(element: &Element, key: &str) -> Result<Option<Color>, ParseError> {
    optional::<Parsed<Color>>(element, key).map(|parsed| parsed.map(|Parsed(color)| color))
}

/// Conversion of a raw attribute value into a typed field.
trait FromAttribute<'a>: Sized {
    fn from_attribute(value: &'a str) -> Option<Self>;
}

impl<'a> FromAttribute<'a> for &'a str {
    fn from_attribute(value: &'a str) -> Option<Self> {
        Some(value)
    }
}

macro_rules! numeric_attribute {
    ($($ty:ty),*) => {
        $(impl<'a> FromAttribute<'a> for $ty {
            fn from_attribute(value: &'a str) -> Option<Self> {
                value.trim().parse().ok()
            }
        })*
    };
}

numeric_attribute!(u32, u64, i32, f32);

/// Any `FromStr` type, used for attribute types the model borrows from `tiled`.
struct Parsed<T>(T);

impl<'a, T: FromStr> FromAttribute<'a> for Parsed<T> {
    fn from_attribute(value: &'a str) -> Option<Self> {
        value.parse().ok().map(Parsed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const LEVEL: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="100" height="50" tilewidth="16" tileheight="16" infinite="0" backgroundcolor="#202040" nextlayerid="6" nextobjectid="4">
 <properties>
  <property name="music" type="file" value="theme.ogg"/>
 </properties>
 <tileset firstgid="1" source="../tilesets/grass.tsx"/>
 <tileset firstgid="65" name="props" tilewidth="16" tileheight="16" tilecount="4" columns="2">
  <image source="props.png" width="32" height="32" trans="ff00ff"/>
  <tile id="0"><properties><property name="solid" type="bool" value="true"/></properties></tile>
 </tileset>
 <layer id="1" name="Ground" width="2" height="2" opacity="0.5">
  <data encoding="csv">1,2,
3,4</data>
 </layer>
 <objectgroup id="2" name="Objects" draworder="index">
  <object id="1" template="door.tx" x="32" y="48"/>
  <object id="2" name="Zone" type="trigger" x="0" y="0" width="16" height="8">
   <ellipse/>
  </object>
  <object id="3" x="4" y="4"><polygon points="0,0 8,0 4,6"/></object>
 </objectgroup>
 <group id="3" name="Decor" visible="0" offsetx="2" offsety="-3">
  <properties><property name="depth" type="int" value="2"/></properties>
  <imagelayer id="4" name="Sky" repeatx="1">
   <image source="sky.png"/>
  </imagelayer>
  <group id="5" name="Empty"/>
 </group>
</map>
"##;

    #[test]
    fn test_parse_map_attributes() {
        let map = parse_map(LEVEL.as_bytes()).unwrap();

        assert_eq!(map.version.as_deref(), Some("1.10"));
        assert_eq!(map.orientation, Orientation::Orthogonal);
        assert_eq!(map.render_order, RenderOrder::RightDown);
        assert_eq!((map.width, map.height), (100, 50));
        assert_eq!((map.tile_width, map.tile_height), (16, 16));
        assert!(!map.infinite);
        assert_eq!(
            map.background_color,
            Some(Color {
                red: 0x20,
                green: 0x20,
                blue: 0x40,
                alpha: 0xff,
            })
        );
        assert_eq!(map.next_object_id, Some(4));
        assert_eq!(map.properties.len(), 1);
        assert!(map.file_path.as_os_str().is_empty());
    }

    #[test]
    fn test_parse_tilesets_in_order() {
        let map = parse_map(LEVEL.as_bytes()).unwrap();

        assert_eq!(map.tilesets.len(), 2);
        assert_eq!(
            map.tilesets[0],
            TilesetRef::External {
                first_gid: 1,
                source: "../tilesets/grass.tsx".to_string(),
            }
        );

        let TilesetRef::Inline(props) = &map.tilesets[1] else {
            panic!("expected inline tileset");
        };
        assert_eq!(props.first_gid, 65);
        let gids: Vec<_> = map.tilesets.iter().map(TilesetRef::first_gid).collect();
        assert_eq!(gids, [1, 65]);
        assert_eq!(props.name, "props");
        assert_eq!((props.tile_count, props.columns), (4, 2));
        assert_eq!(props.image.source, "props.png");
        assert_eq!(props.image.width, Some(32));
        assert_eq!(
            props.image.transparent_color.map(|c| (c.red, c.green, c.blue)),
            Some((0xff, 0x00, 0xff))
        );
    }

    #[test]
    fn test_parse_layer_tree() {
        let map = parse_map(LEVEL.as_bytes()).unwrap();

        let names: Vec<_> = map.layers.iter().map(|layer| layer.name.as_str()).collect();
        assert_eq!(names, ["Ground", "Objects", "Decor"]);
        assert_eq!(map.layer_count(), 5);

        let LayerKind::Tiles(ground) = &map.layers[0].kind else {
            panic!("expected tile layer");
        };
        assert_eq!(map.layers[0].opacity, 0.5);
        assert_eq!(ground.data.global_tile_ids(), Some(vec![1, 2, 3, 4]));

        let LayerKind::Objects(objects) = &map.layers[1].kind else {
            panic!("expected object layer");
        };
        assert_eq!(objects.draw_order, DrawOrder::Index);
        let ids: Vec<_> = objects.objects.iter().map(|object| object.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(objects.objects[0].template.as_deref(), Some("door.tx"));
        assert_eq!(objects.objects[1].class, "trigger");
        assert_eq!(objects.objects[1].shape, ObjectShape::Ellipse);
        assert_eq!(
            objects.objects[2].shape,
            ObjectShape::Polygon(vec![(0.0, 0.0), (8.0, 0.0), (4.0, 6.0)])
        );

        let decor = &map.layers[2];
        assert!(!decor.visible);
        assert_eq!((decor.offset_x, decor.offset_y), (2.0, -3.0));
        let children = decor.children().unwrap();
        assert_eq!(children.len(), 2);
        let LayerKind::Image(sky) = &children[0].kind else {
            panic!("expected image layer");
        };
        assert!(sky.repeat_x);
        assert_eq!(sky.image, Some(Image::new("sky.png")));
        assert_eq!(children[1].children(), Some(&[][..]));
    }

    #[test]
    fn test_xml_encoded_tiles() {
        let map = parse_map(
            br#"<map width="2" height="1" tilewidth="8" tileheight="8">
                 <layer name="t" width="2" height="1"><data><tile gid="5"/><tile/></data></layer>
               </map>"#,
        )
        .unwrap();
        let LayerKind::Tiles(layer) = &map.layers[0].kind else {
            panic!("expected tile layer");
        };
        assert_eq!(layer.data.global_tile_ids(), Some(vec![5, 0]));
    }

    #[test]
    fn test_infinite_map_chunks() {
        let map = parse_map(
            br#"<map width="10" height="10" tilewidth="8" tileheight="8" infinite="1">
                 <layer name="t" width="10" height="10">
                  <data encoding="csv"><chunk x="-16" y="0" width="2" height="1">7,8</chunk></data>
                 </layer>
               </map>"#,
        )
        .unwrap();
        assert!(map.infinite);
        let LayerKind::Tiles(layer) = &map.layers[0].kind else {
            panic!("expected tile layer");
        };
        assert_eq!(layer.data.chunks.len(), 1);
        assert_eq!(layer.data.chunks[0].x, -16);
        assert_eq!(layer.data.chunks[0].text, "7,8");
    }

    #[test]
    fn test_oversized_dimensions_still_parse() {
        let map = parse_map(br#"<map width="70000" height="1" tilewidth="8" tileheight="8"/>"#)
            .unwrap();
        assert_eq!(map.width, 70000);

        let map = parse_map(
            br#"<map width="4294967296" height="18446744073709551615" tilewidth="8" tileheight="8"/>"#,
        )
        .unwrap();
        assert_eq!(map.width, 4_294_967_296);
        assert_eq!(map.height, u64::MAX);
    }

    #[test]
    fn test_deeply_nested_groups() {
        let depth = 1_000;
        let mut xml = String::from(r#"<map width="1" height="1" tilewidth="8" tileheight="8">"#);
        for level in 0..depth {
            xml.push_str(&format!(r#"<group name="g{level}" opacity="0.5">"#));
        }
        xml.push_str(r#"<imagelayer name="leaf"><image source="leaf.png"/></imagelayer>"#);
        xml.push_str(&"</group>".repeat(depth));
        xml.push_str("</map>");

        let map = parse_map(xml.as_bytes()).unwrap();
        assert_eq!(map.layer_count(), depth + 1);

        let mut layer = &map.layers[0];
        let mut levels = 0;
        while let Some(children) = layer.children() {
            assert_eq!(layer.name, format!("g{levels}"));
            assert_eq!(layer.opacity, 0.5);
            assert_eq!(children.len(), 1);
            layer = &children[0];
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(layer.name, "leaf");
        assert!(matches!(&layer.kind, LayerKind::Image(image) if image.image == Some(Image::new("leaf.png"))));
    }

    #[test]
    fn test_group_children_keep_document_order() {
        let map = parse_map(
            br#"<map width="1" height="1" tilewidth="8" tileheight="8">
                 <layer name="a" width="1" height="1"/>
                 <group name="g1">
                  <properties><property name="p" value="1"/></properties>
                  <imagelayer name="b"/>
                  <group name="g2"><objectgroup name="c"/></group>
                  <imagelayer name="d"/>
                 </group>
                 <objectgroup name="e"/>
                </map>"#,
        )
        .unwrap();

        let top: Vec<_> = map.layers.iter().map(|layer| layer.name.as_str()).collect();
        assert_eq!(top, ["a", "g1", "e"]);
        let g1 = map.layers[1].children().unwrap();
        let inner: Vec<_> = g1.iter().map(|layer| layer.name.as_str()).collect();
        assert_eq!(inner, ["b", "g2", "d"]);
        assert_eq!(g1[1].children().unwrap()[0].name, "c");
        assert_eq!(map.layers[1].properties.len(), 1);
    }

    #[test]
    fn test_tileset_with_source_and_image_prefers_source() {
        let map = parse_map(
            br#"<map width="1" height="1" tilewidth="8" tileheight="8">
                 <tileset firstgid="1" source="a.tsx"><image source="a.png"/></tileset>
               </map>"#,
        )
        .unwrap();
        assert_eq!(map.tilesets[0].reference(), "a.tsx");
    }

    #[test]
    fn test_blank_tileset_source_falls_back_to_image() {
        let map = parse_map(
            br#"<map width="1" height="1" tilewidth="8" tileheight="8">
                 <tileset firstgid="1" source="  " tilewidth="8" tileheight="8"><image source="a.png"/></tileset>
               </map>"#,
        )
        .unwrap();
        assert!(matches!(&map.tilesets[0], TilesetRef::Inline(t) if t.image.source == "a.png"));
    }

    #[test]
    fn test_inline_tileset_without_image() {
        let result = parse_map(
            br#"<map width="1" height="1" tilewidth="8" tileheight="8">
                 <tileset firstgid="1" name="collection" tilewidth="8" tileheight="8"/>
               </map>"#,
        );
        assert!(matches!(
            result,
            Err(ParseError::MissingElement { child, .. }) if child == "image"
        ));
    }

    #[test]
    fn test_unknown_layer_kind() {
        let result = parse_map(
            br#"<map width="1" height="1" tilewidth="8" tileheight="8">
                 <group name="g"><heightmap/></group>
               </map>"#,
        );
        assert!(matches!(result, Err(ParseError::UnknownLayerKind(kind)) if kind == "heightmap"));
    }

    #[test]
    fn test_missing_required_attribute() {
        let result = parse_map(br#"<map height="1" tilewidth="8" tileheight="8"/>"#);
        assert!(matches!(
            result,
            Err(ParseError::MissingAttribute { element, attribute })
                if element == "map" && attribute == "width"
        ));
    }

    #[test]
    fn test_type_mismatched_attribute() {
        let result = parse_map(br#"<map width="-4" height="1" tilewidth="8" tileheight="8"/>"#);
        assert!(matches!(
            result,
            Err(ParseError::InvalidAttribute { attribute, value, .. })
                if attribute == "width" && value == "-4"
        ));
    }

    #[test]
    fn test_wrong_root() {
        let result = parse_map(br#"<tileset firstgid="1"/>"#);
        assert!(matches!(result, Err(ParseError::UnexpectedRoot(name)) if name == "tileset"));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            parse_map(&[0x3c, 0xff, 0xfe]),
            Err(ParseError::Encoding(_))
        ));
    }

    #[test]
    fn test_byte_order_mark() {
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(br#"<map width="1" height="1" tilewidth="8" tileheight="8"/>"#);
        assert_eq!(parse_map(&bytes).unwrap().width, 1);
    }
}
