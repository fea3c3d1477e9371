//! XML element node.

/// An XML element with ordered attributes and ordered child elements.
///
/// Text content, comments and processing instructions are not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes as key-value pairs, in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements, in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create a new node with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute to this node.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Add a child node.
    pub fn child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if the key already exists.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Append a child node.
    pub fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(XmlNode::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut node = XmlNode::new("shader").attr("name", "a").attr("shadertype", "surface");
        node.set_attribute("name", "b");

        assert_eq!(node.attributes.len(), 2);
        assert_eq!(node.attributes[0], ("name".to_string(), "b".to_string()));
        assert_eq!(node.attribute("shadertype"), Some("surface"));
        assert_eq!(node.attribute("missing"), None);
    }

    #[test]
    fn test_subtree_len() {
        let node = XmlNode::new("a")
            .child(XmlNode::new("b").child(XmlNode::new("c")))
            .child(XmlNode::new("d"));
        assert_eq!(node.subtree_len(), 4);
    }
}
