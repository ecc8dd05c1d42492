//! `<properties>` blocks → `tiled::Properties`.

use tiled::{Color, Properties, PropertyValue};

use super::xml::Element;
use super::{ParseError, invalid};

/// Parse the `<properties>` child of `owner`, if it has one.
pub(crate) fn parse_properties(owner: &Element) -> Result<Properties, ParseError> {
    let mut properties = Properties::new();
    let Some(block) = owner.child("properties") else {
        return Ok(properties);
    };

    for property in block.children_named("property") {
        let name = property
            .attribute("name")
            .ok_or_else(|| ParseError::MissingAttribute {
                element: "property".to_string(),
                attribute: "name".to_string(),
            })?;
        properties.insert(name.to_string(), parse_property_value(property)?);
    }

    Ok(properties)
}

fn parse_property_value(property: &Element) -> Result<PropertyValue, ParseError> {
    // Multi-line strings are stored as element text instead of `value`
    let raw = property.attribute("value").unwrap_or(&property.text);

    let value = match property.attribute("type").unwrap_or("string") {
        "string" => PropertyValue::StringValue(raw.to_string()),
        "file" => PropertyValue::FileValue(raw.to_string()),
        "int" => PropertyValue::IntValue(
            raw.parse()
                .map_err(|_| invalid("property", "value", raw))?,
        ),
        "float" => PropertyValue::FloatValue(
            raw.parse()
                .map_err(|_| invalid("property", "value", raw))?,
        ),
        "bool" => PropertyValue::BoolValue(match raw {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => return Err(invalid("property", "value", raw)),
        }),
        "color" => PropertyValue::ColorValue(parse_property_color(raw)?),
        "object" => PropertyValue::ObjectValue(if raw.is_empty() {
            0
        } else {
            raw.parse()
                .map_err(|_| invalid("property", "value", raw))?
        }),
        "class" => PropertyValue::ClassValue {
            property_type: property
                .attribute("propertytype")
                .unwrap_or_default()
                .to_string(),
            properties: parse_properties(property)?,
        },
        other => return Err(invalid("property", "type", other)),
    };

    Ok(value)
}

/// Tiled writes an empty string for an unset color property.
fn parse_property_color(raw: &str) -> Result<Color, ParseError> {
    if raw.is_empty() {
        return Ok(Color {
            red: 0,
            green: 0,
            blue: 0,
            alpha: 0,
        });
    }
    raw.parse()
        .map_err(|()| invalid("property", "value", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::xml::read_tree;

    fn properties_of(xml: &str) -> Result<Properties, ParseError> {
        parse_properties(&read_tree(xml).unwrap())
    }

    #[test]
    fn test_typed_properties() {
        let properties = properties_of(
            r##"<map><properties>
                <property name="title" value="Level 1"/>
                <property name="lives" type="int" value="3"/>
                <property name="gravity" type="float" value="9.5"/>
                <property name="dark" type="bool" value="true"/>
                <property name="tint" type="color" value="#ff102030"/>
                <property name="music" type="file" value="../audio/theme.ogg"/>
                <property name="target" type="object" value="12"/>
            </properties></map>"##,
        )
        .unwrap();

        assert_eq!(
            properties["title"],
            PropertyValue::StringValue("Level 1".to_string())
        );
        assert_eq!(properties["lives"], PropertyValue::IntValue(3));
        assert_eq!(properties["gravity"], PropertyValue::FloatValue(9.5));
        assert_eq!(properties["dark"], PropertyValue::BoolValue(true));
        assert_eq!(
            properties["tint"],
            PropertyValue::ColorValue(Color {
                red: 0x10,
                green: 0x20,
                blue: 0x30,
                alpha: 0xff,
            })
        );
        // File properties are not build dependencies and stay untouched
        assert_eq!(
            properties["music"],
            PropertyValue::FileValue("../audio/theme.ogg".to_string())
        );
        assert_eq!(properties["target"], PropertyValue::ObjectValue(12));
    }

    #[test]
    fn test_multiline_string_uses_text() {
        let properties = properties_of(
            r#"<map><properties><property name="intro">Once upon
a time</property></properties></map>"#,
        )
        .unwrap();
        assert_eq!(
            properties["intro"],
            PropertyValue::StringValue("Once upon\na time".to_string())
        );
    }

    #[test]
    fn test_class_property_nests() {
        let properties = properties_of(
            r#"<map><properties>
                <property name="door" type="class" propertytype="game::Door">
                  <properties><property name="locked" type="bool" value="false"/></properties>
                </property>
            </properties></map>"#,
        )
        .unwrap();

        let PropertyValue::ClassValue {
            property_type,
            properties: members,
        } = &properties["door"]
        else {
            panic!("expected class value");
        };
        assert_eq!(property_type, "game::Door");
        assert_eq!(members["locked"], PropertyValue::BoolValue(false));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let result = properties_of(
            r#"<map><properties><property name="n" type="int" value="three"/></properties></map>"#,
        );
        assert!(matches!(
            result,
            Err(ParseError::InvalidAttribute { value, .. }) if value == "three"
        ));
    }

    #[test]
    fn test_missing_block_is_empty() {
        assert!(properties_of("<map/>").unwrap().is_empty());
    }
}
