//! The `<materialx>` document and the recursive tree builder.

use std::io::Write;
use std::str::FromStr;

use mtlx_xml::{WriteOptions, XmlNode};

use crate::{
    Element, ElementKind, Error, ReadOptions, Result, SchemaRegistry, SkippedValue,
};

/// The only document version this crate reads.
pub const SUPPORTED_VERSION: &str = "1.0";

/// A MaterialX document: a `<materialx>` root element and its subtree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Document {
    root: Element,
}

/// Result of a parse that may have skipped malformed values.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub document: Document,
    /// Values dropped under [`ValueErrorPolicy::Skip`](crate::ValueErrorPolicy::Skip).
    pub skipped: Vec<SkippedValue>,
}

impl Document {
    /// An empty document at the supported version.
    pub fn new() -> Self {
        Self {
            root: ElementKind::Document.instantiate(),
        }
    }

    /// Root element.
    #[inline]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Root element, mutably.
    #[inline]
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Declared document version.
    pub fn version(&self) -> Option<&str> {
        self.root.get_str("version")
    }

    /// Top-level elements in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.root.children()
    }

    /// Look up a top-level element by key.
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.root.child(key)
    }

    /// Add a top-level element, returning the one it replaces.
    pub fn insert(&mut self, element: Element) -> Option<Element> {
        self.root.insert_child(element)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    /// Parse XML text with default options and the built-in registry.
    pub fn parse_str(xml: &str) -> Result<Self> {
        Ok(Self::parse_str_with(xml, SchemaRegistry::global(), &ReadOptions::default())?.document)
    }

    /// Parse XML text with an explicit registry and options.
    ///
    /// [`ReadOptions::max_depth`] bounds the XML reader as well, so unknown
    /// subtrees cannot nest deeper than the elements that are built.
    pub fn parse_str_with(
        xml: &str,
        registry: &SchemaRegistry,
        options: &ReadOptions,
    ) -> Result<ParseOutcome> {
        // The reader counts the root element as the first level.
        let node = XmlNode::parse_with_max_depth(xml, options.max_depth.saturating_add(1))
            .map_err(|e| match e {
                mtlx_xml::Error::TooDeep { .. } => Error::DepthLimitExceeded {
                    limit: options.max_depth,
                },
                e => Error::Xml(e),
            })?;
        Self::from_node_with(&node, registry, options)
    }

    /// Build a document from an already parsed node tree.
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self::from_node_with(node, SchemaRegistry::global(), &ReadOptions::default())?.document)
    }

    /// Build a document from a node tree with an explicit registry and options.
    ///
    /// Unknown child tags are skipped with their subtrees. Leaf kinds ignore
    /// their input children. Siblings sharing a key overwrite each other in
    /// document order.
    pub fn from_node_with(
        node: &XmlNode,
        registry: &SchemaRegistry,
        options: &ReadOptions,
    ) -> Result<ParseOutcome> {
        let mut root = ElementKind::Document.instantiate();
        if node.tag != root.tag() {
            return Err(Error::SchemaMismatch {
                expected: root.tag().to_owned(),
                found: node.tag.clone(),
            });
        }

        match node.attribute("version") {
            Some(SUPPORTED_VERSION) => {}
            Some(found) => {
                return Err(Error::UnsupportedVersion {
                    found: found.to_owned(),
                    supported: SUPPORTED_VERSION,
                })
            }
            None => {
                return Err(Error::MissingAttribute {
                    tag: node.tag.clone(),
                    attribute: "version".to_owned(),
                })
            }
        }

        let mut builder = TreeBuilder {
            registry,
            options,
            skipped: Vec::new(),
        };
        root.read_attributes(node, options.on_value_error, &mut builder.skipped)?;
        builder.build_children(node, &mut root, 0)?;

        tracing::debug!(
            elements = root.descendants().count() - 1,
            skipped = builder.skipped.len(),
            "parsed document"
        );

        Ok(ParseOutcome {
            document: Self { root },
            skipped: builder.skipped,
        })
    }

    /// Convert to a node tree.
    pub fn to_node(&self) -> Result<XmlNode> {
        self.root.to_node()
    }

    /// Render as XML text.
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        Ok(self.to_node()?.to_xml_string(options)?)
    }

    /// Write XML text to a writer.
    pub fn write_xml<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<()> {
        Ok(self.to_node()?.write_xml(writer, options)?)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

/// Depth-first builder state for one parse.
struct TreeBuilder<'a> {
    registry: &'a SchemaRegistry,
    options: &'a ReadOptions,
    skipped: Vec<SkippedValue>,
}

impl TreeBuilder<'_> {
    fn build_children(&mut self, node: &XmlNode, parent: &mut Element, depth: usize) -> Result<()> {
        if node.children.is_empty() {
            return Ok(());
        }
        if depth >= self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }

        for child_node in &node.children {
            let Some(schema) = self.registry.get(&child_node.tag) else {
                tracing::debug!(tag = %child_node.tag, parent = %parent.tag(), "skipping unknown element");
                continue;
            };

            let mut child = schema.instantiate();
            child.read_attributes(child_node, self.options.on_value_error, &mut self.skipped)?;

            if schema.is_container() {
                self.build_children(child_node, &mut child, depth + 1)?;
            }

            if let Some(previous) = parent.insert_child(child) {
                tracing::debug!(
                    tag = %previous.tag(),
                    key = %previous.key(),
                    parent = %parent.tag(),
                    "replacing element with duplicate key"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementSchema, ValueErrorPolicy, ValueKind};

    #[test]
    fn test_new_document_serializes() {
        let doc = Document::new();
        let xml = doc.to_xml_string(&WriteOptions::compact()).unwrap();
        assert_eq!(xml, r#"<materialx version="1.0"/>"#);
        assert_eq!(doc.version(), Some("1.0"));
    }

    #[test]
    fn test_root_tag_mismatch() {
        let err = Document::parse_str(r#"<mtlx version="1.0"/>"#).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { ref found, .. } if found == "mtlx"));
    }

    #[test]
    fn test_unsupported_version() {
        let err = Document::parse_str(r#"<materialx version="1.38"/>"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion { ref found, .. } if found == "1.38"));

        let err = Document::parse_str("<materialx/>").unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { ref attribute, .. } if attribute == "version"));
    }

    #[test]
    fn test_xml_errors_propagate() {
        assert!(matches!(Document::parse_str(""), Err(Error::Xml(_))));
    }

    #[test]
    fn test_unknown_tags_are_skipped_with_subtree() {
        let xml = r#"<materialx version="1.0">
            <opgraph name="graph1">
                <material name="hidden"/>
            </opgraph>
            <material name="m1">
                <nodedef name="nd"/>
                <shaderref name="s1"/>
            </material>
        </materialx>"#;

        let doc = Document::parse_str(xml).unwrap();
        assert_eq!(doc.children().map(|(k, _)| k).collect::<Vec<_>>(), ["m1"]);

        let material = doc.get("m1").unwrap();
        assert_eq!(material.child_keys().collect::<Vec<_>>(), ["s1"]);
    }

    #[test]
    fn test_leaf_children_are_ignored() {
        let xml = r#"<materialx version="1.0">
            <shader name="s" shadertype="surface" shaderprogram="p">
                <parameter name="p1" type="float" value="1">
                    <parameter name="nested" type="float" value="2"/>
                </parameter>
            </shader>
        </materialx>"#;

        let doc = Document::parse_str(xml).unwrap();
        let param = doc.get("s").unwrap().child("p1").unwrap();
        assert_eq!(param.child_count(), 0);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let xml = r#"<materialx version="1.0">
            <look name="lookA"/>
            <collection name="c"/>
            <look name="lookA">
                <materialassign name="m" collection="c"/>
            </look>
        </materialx>"#;

        let doc = Document::parse_str(xml).unwrap();
        assert_eq!(doc.children().map(|(k, _)| k).collect::<Vec<_>>(), ["lookA", "c"]);
        assert_eq!(doc.get("lookA").unwrap().child_count(), 1);
    }

    #[test]
    fn test_lenient_parse_collects_skipped_values() {
        let xml = r#"<materialx version="1.0">
            <material name="m" xpos="left" ypos="2"/>
            <collection name="c">
                <collectionadd name="a" geom="/g" includechildren="yes"/>
            </collection>
        </materialx>"#;

        assert!(matches!(
            Document::parse_str(xml),
            Err(Error::InvalidAttribute { ref attribute, .. }) if attribute == "xpos"
        ));

        let outcome =
            Document::parse_str_with(xml, SchemaRegistry::global(), &ReadOptions::lenient()).unwrap();
        let attributes: Vec<_> = outcome.skipped.iter().map(|s| s.attribute.as_str()).collect();
        assert_eq!(attributes, ["xpos", "includechildren"]);

        let material = outcome.document.get("m").unwrap();
        assert_eq!(material.get("xpos"), None);
        assert_eq!(material.get_float("ypos"), Some(2.0));

        let add = outcome.document.get("c").unwrap().child("a").unwrap();
        assert_eq!(add.get_str("geom"), Some("/g"));
        assert_eq!(add.get_bool("includechildren"), None);
    }

    #[test]
    fn test_custom_registry() {
        let registry = SchemaRegistry::builtin().with(
            ElementSchema::container("opgraph")
                .required("name", ValueKind::String)
                .optional("xpos", ValueKind::Float),
        );
        let xml = r#"<materialx version="1.0"><opgraph name="g" xpos="4"/></materialx>"#;

        let outcome = Document::parse_str_with(xml, &registry, &ReadOptions::default()).unwrap();
        let graph = outcome.document.get("g").unwrap();
        assert_eq!(graph.tag(), "opgraph");
        assert_eq!(graph.get_float("xpos"), Some(4.0));
    }

    #[test]
    fn test_depth_limit() {
        let xml = r#"<materialx version="1.0">
            <look name="a"><look name="b"><look name="c"/></look></look>
        </materialx>"#;

        let options = ReadOptions {
            on_value_error: ValueErrorPolicy::Abort,
            max_depth: 2,
        };
        let result = Document::parse_str_with(xml, SchemaRegistry::global(), &options);
        assert!(matches!(result, Err(Error::DepthLimitExceeded { limit: 2 })));

        let options = ReadOptions {
            max_depth: 3,
            ..options
        };
        assert!(Document::parse_str_with(xml, SchemaRegistry::global(), &options).is_ok());
    }

    #[test]
    fn test_depth_limit_covers_unknown_subtrees() {
        let depth = 200_000;
        let xml = format!(
            r#"<materialx version="1.0"><look name="lookA"/>{}{}</materialx>"#,
            "<nodegraph>".repeat(depth),
            "</nodegraph>".repeat(depth)
        );

        let result = Document::parse_str(&xml);
        assert!(matches!(
            result,
            Err(Error::DepthLimitExceeded { limit: crate::DEFAULT_MAX_DEPTH })
        ));

        let shallow = format!(
            r#"<materialx version="1.0"><look name="lookA"/>{}{}</materialx>"#,
            "<nodegraph>".repeat(8),
            "</nodegraph>".repeat(8)
        );
        let doc = Document::parse_str(&shallow).unwrap();
        assert_eq!(doc.children().map(|(k, _)| k).collect::<Vec<_>>(), ["lookA"]);
    }

    #[test]
    fn test_from_str() {
        let doc: Document = r#"<materialx version="1.0"><aovset name="outUV"/></materialx>"#
            .parse()
            .unwrap();
        assert!(doc.get("outUV").is_some());
    }
}
