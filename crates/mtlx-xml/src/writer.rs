//! Render an [`XmlNode`] tree as XML text.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::{Error, Result, XmlNode};

/// Formatting options for XML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level, or `None` to write everything on one line.
    pub indent: Option<usize>,
    /// Emit an `<?xml version="1.0" encoding="utf-8"?>` declaration.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }
}

impl WriteOptions {
    /// Single-line output without a declaration.
    pub fn compact() -> Self {
        Self {
            indent: None,
            declaration: false,
        }
    }
}

impl XmlNode {
    /// Convert to an XML string.
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output, options)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write XML to a writer.
    pub fn write_xml<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<()> {
        let mut xml_writer = match options.indent {
            Some(width) => Writer::new_with_indent(writer, b' ', width),
            None => Writer::new(writer),
        };

        if options.declaration {
            xml_writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        write_element(&mut xml_writer, self)
    }
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, node: &XmlNode) -> Result<()> {
    let mut elem = BytesStart::new(node.tag.as_str());

    for (key, value) in &node.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() {
        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::Xml(e.to_string()))?;
    } else {
        writer
            .write_event(Event::Start(elem))
            .map_err(|e| Error::Xml(e.to_string()))?;

        for child in &node.children {
            write_element(writer, child)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_compact() {
        let node = XmlNode::new("materialx")
            .attr("version", "1.0")
            .child(XmlNode::new("look").attr("name", "lookA"));

        let xml = node.to_xml_string(&WriteOptions::compact()).unwrap();
        assert_eq!(xml, r#"<materialx version="1.0"><look name="lookA"/></materialx>"#);
    }

    #[test]
    fn test_write_escapes_attribute_values() {
        let node = XmlNode::new("geominfo").attr("regex", "a&b <c> \"d\"");
        let xml = node.to_xml_string(&WriteOptions::compact()).unwrap();

        let reparsed = XmlNode::parse(&xml).unwrap();
        assert_eq!(reparsed.attribute("regex"), Some("a&b <c> \"d\""));
    }

    #[test]
    fn test_write_default_has_declaration_and_indent() {
        let node = XmlNode::new("materialx").child(XmlNode::new("collection"));
        let xml = node.to_xml_string(&WriteOptions::default()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("\n  <collection/>"));
    }

    #[test]
    fn test_xml_round_trip() {
        let original = r#"<materialx version="1.0">
            <shader name="lambert1" shadertype="surface" shaderprogram="lambert">
                <parameter name="color" type="color3" value="0.5,0.3,0.1"/>
                <parameter name="names" type="stringarray" value="a\,b,&lt;c&gt;"/>
            </shader>
        </materialx>"#;

        let parsed = XmlNode::parse(original).unwrap();
        let xml = parsed.to_xml_string(&WriteOptions::default()).unwrap();
        let reparsed = XmlNode::parse(&xml).unwrap();

        assert_eq!(parsed, reparsed);
        assert_eq!(reparsed.children[0].children[1].attribute("value"), Some(r"a\,b,<c>"));
    }
}
