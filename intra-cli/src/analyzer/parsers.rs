//! Manifest format decoders.
//!
//! Every parser returns `None` for malformed input so a broken manifest only
//! costs the structured data of that one file.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub fn parse_json(content: &str) -> Option<serde_json::Value> {
    serde_json::from_str(content)
        .map_err(|e| log::debug!("Invalid JSON manifest: {}", e))
        .ok()
}

pub fn parse_yaml(content: &str) -> Option<serde_yaml::Value> {
    serde_yaml::from_str(content)
        .map_err(|e| log::debug!("Invalid YAML manifest: {}", e))
        .ok()
}

pub fn parse_toml(content: &str) -> Option<toml::Value> {
    toml::from_str(content)
        .map_err(|e| log::debug!("Invalid TOML manifest: {}", e))
        .ok()
}

/// An XML element with its attributes, direct text and child elements.
///
/// Names are stored without namespace prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Trimmed text of the named direct child, if present and non-empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
    }

    /// All elements named `name` anywhere below this one, in document order.
    pub fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Option<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.ok()?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().ok()?.into_owned();
            attributes.push((key, value));
        }
        Some(Self {
            name,
            attributes,
            ..Self::default()
        })
    }
}

/// Parses an XML document into its root element.
pub fn parse_xml(content: &str) -> Option<XmlElement> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(XmlElement::from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let element = XmlElement::from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                let element = stack.pop()?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    let decoded = text
                        .unescape()
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                    current.text.push_str(&decoded);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                log::debug!("Invalid XML manifest: {}", e);
                return None;
            }
        }
    }

    if !stack.is_empty() {
        log::debug!("Invalid XML manifest: {} unclosed element(s)", stack.len());
        return None;
    }
    root
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json() {
        assert_eq!(
            parse_json(r#"{"a": 1}"#).and_then(|v| v.get("a").cloned()),
            Some(serde_json::json!(1))
        );
        assert!(parse_json("{ not json").is_none());
    }

    #[test]
    fn test_yaml() {
        let value = parse_yaml("name: app\nenvironment:\n  sdk: '>=3.0.0 <4.0.0'\n").unwrap();
        assert_eq!(value["environment"]["sdk"].as_str(), Some(">=3.0.0 <4.0.0"));
        assert!(parse_yaml("key: [unclosed").is_none());
    }

    #[test]
    fn test_toml() {
        let value = parse_toml("[package]\nname = \"x\"\n").unwrap();
        assert_eq!(value["package"]["name"].as_str(), Some("x"));
        assert!(parse_toml("[package\nname =").is_none());
    }

    #[test]
    fn test_xml_tree() {
        let doc = r#"<?xml version="1.0"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <properties><java.version>17</java.version></properties>
  <dependencies>
    <dependency><groupId>junit</groupId><artifactId>junit</artifactId></dependency>
  </dependencies>
  <ItemGroup><PackageReference Include="Serilog" Version="3.1.1" /></ItemGroup>
</project>"#;
        let root = parse_xml(doc).unwrap();

        assert_eq!(root.name, "project");
        assert_eq!(
            root.child("properties").and_then(|p| p.child_text("java.version")),
            Some("17")
        );
        let deps = root.descendants("dependency");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].child_text("artifactId"), Some("junit"));

        let package = root.descendants("PackageReference");
        assert_eq!(package[0].attr("Include"), Some("Serilog"));
        assert_eq!(package[0].attr("Version"), Some("3.1.1"));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse_xml("<project><dependencies></project>").is_none());
        assert!(parse_xml("<project>").is_none());
        assert!(parse_xml("").is_none());
    }
}
