use tiled::Properties;

/// An object placed on an object layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    /// `class` attribute (or the pre-1.9 `type` attribute)
    pub class: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees, clockwise
    pub rotation: f32,
    /// Tile reference for tile objects
    pub gid: Option<u32>,
    pub visible: bool,
    /// Template (.tx) this object instantiates, raw until resolved.
    ///
    /// Blank values are treated as "no template".
    pub template: Option<String>,
    pub shape: ObjectShape,
    pub properties: Properties,
}

impl MapObject {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: String::new(),
            class: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            gid: None,
            visible: true,
            template: None,
            shape: ObjectShape::Rectangle,
            properties: Properties::new(),
        }
    }

    /// The template source, unless it is missing or whitespace only.
    pub fn template_source(&self) -> Option<&str> {
        self.template.as_deref().filter(|source| !is_blank(source))
    }

    /// Mutable access to the template source, with the same blank filtering
    /// as [`MapObject::template_source`].
    pub fn template_source_mut(&mut self) -> Option<&mut String> {
        self.template.as_mut().filter(|source| !is_blank(source))
    }
}

fn is_blank(source: &str) -> bool {
    source.trim().is_empty()
}

/// Geometry of an object.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ObjectShape {
    #[default]
    Rectangle,
    Ellipse,
    Point,
    /// Closed polygon, points relative to the object position
    Polygon(Vec<(f32, f32)>),
    /// Open polyline, points relative to the object position
    Polyline(Vec<(f32, f32)>),
    Text(String),
}
