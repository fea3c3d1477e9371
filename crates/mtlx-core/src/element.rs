//! Generic element: typed attribute slots plus named children.

use indexmap::IndexMap;
use mtlx_xml::XmlNode;

use crate::{Attribute, Error, Result, Value, ValueErrorPolicy, ValueKind, ValueParseError};

/// A typed node in the document tree.
///
/// Attribute slots are fixed when the element is constructed (usually from an
/// [`ElementSchema`](crate::ElementSchema)); only their values change later.
/// Children are keyed by name and keep insertion order. Inserting a child
/// under an existing key replaces the old child in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, Attribute>,
    children: IndexMap<String, Element>,
}

/// An attribute value that was dropped under [`ValueErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedValue {
    /// Tag of the element carrying the attribute.
    pub tag: String,
    /// Attribute name.
    pub attribute: String,
    /// Why the literal was rejected.
    pub error: ValueParseError,
}

impl Element {
    /// Create an element with the given attribute slots and no children.
    pub fn new(tag: impl Into<String>, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        Self {
            tag: tag.into(),
            attributes: attributes
                .into_iter()
                .map(|attr| (attr.name().to_owned(), attr))
                .collect(),
            children: IndexMap::new(),
        }
    }

    /// Element tag.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of the `name` attribute, if the element has one and it is set.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Key under which this element is stored in its parent: its name, or its
    /// tag when unnamed.
    pub fn key(&self) -> &str {
        self.name().unwrap_or(&self.tag)
    }

    // ----- attributes -----

    /// Attribute slots in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// Look up an attribute slot.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Look up an attribute slot mutably.
    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    /// Current value of an attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).and_then(Attribute::value)
    }

    /// Current value of a text attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Current value of a float attribute.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Current value of a boolean attribute.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Parse `raw` into the named slot.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        let tag = &self.tag;
        let attr = self
            .attributes
            .get_mut(name)
            .ok_or_else(|| Error::UnknownAttribute {
                tag: tag.clone(),
                attribute: name.to_owned(),
            })?;

        attr.set(raw).map_err(|source| Error::InvalidAttribute {
            tag: tag.clone(),
            attribute: name.to_owned(),
            source,
        })
    }

    /// Assign a decoded value to the named slot.
    pub fn assign(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        match self.attributes.get_mut(name) {
            Some(attr) => attr.assign(value.into()),
            None => Err(Error::UnknownAttribute {
                tag: self.tag.clone(),
                attribute: name.to_owned(),
            }),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: &str, raw: &str) -> Result<Self> {
        self.set(name, raw)?;
        Ok(self)
    }

    /// Resolve a text payload (`value`, `default`) using the kind named by the
    /// element's `type` attribute.
    ///
    /// Returns `Ok(None)` when the payload slot is unset.
    pub fn typed_value(&self, slot: &str) -> Result<Option<Value>> {
        let Some(raw) = self.get_str(slot) else {
            return Ok(None);
        };

        let type_tag = self.get_str("type").ok_or_else(|| Error::MissingAttribute {
            tag: self.tag.clone(),
            attribute: "type".to_owned(),
        })?;
        let kind: ValueKind = type_tag.parse()?;

        kind.parse(raw)
            .map(Some)
            .map_err(|source| Error::InvalidAttribute {
                tag: self.tag.clone(),
                attribute: slot.to_owned(),
                source,
            })
    }

    /// Set a slot the caller knows exists with the value's kind.
    pub(crate) fn preset(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if let Some(attr) = self.attributes.get_mut(name) {
            debug_assert_eq!(attr.kind(), value.kind(), "<{}> {}", self.tag, name);
            attr.value = Some(value);
        }
        self
    }

    // ----- children -----

    /// Children in insertion order, with their keys.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Child keys in insertion order.
    pub fn child_keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Look up a child by key.
    pub fn child(&self, key: &str) -> Option<&Element> {
        self.children.get(key)
    }

    /// Look up a child by key mutably.
    pub fn child_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.children.get_mut(key)
    }

    /// Attach a child under its [`key`](Self::key), returning the child it
    /// replaces.
    pub fn insert_child(&mut self, child: Element) -> Option<Element> {
        let key = child.key().to_owned();
        self.insert_child_as(key, child)
    }

    /// Attach a child under an explicit key, returning the child it replaces.
    pub fn insert_child_as(&mut self, key: impl Into<String>, child: Element) -> Option<Element> {
        self.children.insert(key.into(), child)
    }

    /// Builder form of [`insert_child`](Self::insert_child).
    pub fn with_child(mut self, child: Element) -> Self {
        self.insert_child(child);
        self
    }

    /// Detach a child, keeping the order of the remaining ones.
    pub fn remove_child(&mut self, key: &str) -> Option<Element> {
        self.children.shift_remove(key)
    }

    /// Depth-first, pre-order walk over this element and all descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    // ----- node conversion -----

    /// Read attribute values from `node`, which must carry this element's tag.
    ///
    /// Attributes without a matching slot are ignored. Slots absent from the
    /// node keep their current values, required or not. The first malformed
    /// value aborts.
    pub fn parse(&mut self, node: &XmlNode) -> Result<()> {
        let mut skipped = Vec::new();
        self.read_attributes(node, ValueErrorPolicy::Abort, &mut skipped)
    }

    pub(crate) fn read_attributes(
        &mut self,
        node: &XmlNode,
        policy: ValueErrorPolicy,
        skipped: &mut Vec<SkippedValue>,
    ) -> Result<()> {
        if node.tag != self.tag {
            return Err(Error::SchemaMismatch {
                expected: self.tag.clone(),
                found: node.tag.clone(),
            });
        }

        for (key, raw) in &node.attributes {
            let Some(attr) = self.attributes.get_mut(key) else {
                tracing::trace!(tag = %self.tag, attribute = %key, "ignoring undeclared attribute");
                continue;
            };

            if let Err(error) = attr.set(raw) {
                match policy {
                    ValueErrorPolicy::Abort => {
                        return Err(Error::InvalidAttribute {
                            tag: self.tag.clone(),
                            attribute: key.clone(),
                            source: error,
                        });
                    }
                    ValueErrorPolicy::Skip => {
                        tracing::warn!(tag = %self.tag, attribute = %key, %error, "skipping malformed value");
                        skipped.push(SkippedValue {
                            tag: self.tag.clone(),
                            attribute: key.clone(),
                            error,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Convert this element and its subtree into an XML node.
    ///
    /// Unset optional attributes are omitted; an unset required attribute is
    /// an error.
    pub fn to_node(&self) -> Result<XmlNode> {
        let mut node = XmlNode::new(self.tag.as_str());

        for attr in self.attributes.values() {
            match attr.render() {
                Some(text) => node.attributes.push((attr.name().to_owned(), text)),
                None if attr.is_required() => {
                    return Err(Error::MissingRequiredAttribute {
                        tag: self.tag.clone(),
                        attribute: attr.name().to_owned(),
                    });
                }
                None => {}
            }
        }

        for child in self.children.values() {
            node.push_child(child.to_node()?);
        }

        Ok(node)
    }
}

/// Iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.values().rev());
        Some(element)
    }
}
