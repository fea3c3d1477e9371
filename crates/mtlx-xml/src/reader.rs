//! Parse XML text into an [`XmlNode`] tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Error, Result, XmlNode};

/// Default element nesting limit for [`XmlNode::parse`], counting the root.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

impl XmlNode {
    /// Parse XML text and return its document element.
    ///
    /// Declarations, comments, processing instructions and text content are
    /// skipped. Nesting deeper than [`DEFAULT_MAX_DEPTH`] is rejected.
    pub fn parse(xml: &str) -> Result<Self> {
        parse_xml_to_node(xml, DEFAULT_MAX_DEPTH)
    }

    /// Parse XML text, rejecting elements nested more than `max_depth` levels
    /// deep (the document element is level 1).
    pub fn parse_with_max_depth(xml: &str, max_depth: usize) -> Result<Self> {
        parse_xml_to_node(xml, max_depth)
    }

    /// Parse UTF-8 encoded XML bytes.
    pub fn parse_bytes(xml: &[u8]) -> Result<Self> {
        let xml_str = std::str::from_utf8(xml).map_err(Error::Utf8)?;
        Self::parse(xml_str)
    }
}

fn parse_xml_to_node(xml: &str, max_depth: usize) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                check_depth(stack.len(), max_depth)?;
                let node = start_node(&e)?;
                if stack.is_empty() && root.is_some() {
                    return Err(Error::MultipleRoots(node.tag));
                }
                stack.push(node);
            }
            Ok(Event::Empty(e)) => {
                // Self-closing element
                check_depth(stack.len(), max_depth)?;
                let node = start_node(&e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // Text, comments, declarations
            Err(e) => return Err(Error::Xml(format!("XML parse error: {}", e))),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(Error::Unclosed(open.tag));
    }

    root.ok_or(Error::NoRoot)
}

fn check_depth(open: usize, max_depth: usize) -> Result<()> {
    if open >= max_depth {
        return Err(Error::TooDeep { limit: max_depth });
    }
    Ok(())
}

fn start_node(e: &BytesStart<'_>) -> Result<XmlNode> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = XmlNode::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(Error::MultipleRoots(node.tag));
    } else {
        *root = Some(node);
    }
    Ok(())
}
