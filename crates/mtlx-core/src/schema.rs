//! Element schemas and the tag registry.
//!
//! An [`ElementSchema`] declares a tag, its ordered attribute slots and
//! whether the tree builder descends into its children. The
//! [`SchemaRegistry`] maps tags to schemas; the built-in registry covers the
//! MaterialX 1.0 vocabulary below and is shared process-wide.
//!
//! | Tag | Nesting |
//! |---|---|
//! | `collection`, `geominfo`, `shader`, `aovset`, `material`, `shaderref`, `look` | container |
//! | `collectionadd`, `geomattr`, `coshader`, `parameter`, `aov`, `materialassign` | leaf |

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::{Attribute, Element, Error, Result, Value, ValueKind};

/// Whether the tree builder descends into an element's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Children in the input are ignored.
    Leaf,
    /// Children are built recursively.
    Container,
}

/// Declaration of one attribute slot.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    pub name: String,
    pub kind: ValueKind,
    pub required: bool,
    /// Value the slot starts with.
    pub default: Option<Value>,
}

impl AttributeSpec {
    fn instantiate(&self) -> Attribute {
        let mut attr = Attribute::new(self.name.clone(), self.kind, self.required);
        attr.value = self.default.clone();
        attr
    }
}

/// Declaration of one element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSchema {
    tag: String,
    nesting: Nesting,
    attributes: Vec<AttributeSpec>,
}

impl ElementSchema {
    /// Create a schema without attribute slots.
    pub fn new(tag: impl Into<String>, nesting: Nesting) -> Self {
        Self {
            tag: tag.into(),
            nesting,
            attributes: Vec::new(),
        }
    }

    /// Shorthand for a [`Nesting::Leaf`] schema.
    pub fn leaf(tag: impl Into<String>) -> Self {
        Self::new(tag, Nesting::Leaf)
    }

    /// Shorthand for a [`Nesting::Container`] schema.
    pub fn container(tag: impl Into<String>) -> Self {
        Self::new(tag, Nesting::Container)
    }

    /// Declare a required slot.
    pub fn required(self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.slot(name, kind, true, None)
    }

    /// Declare an optional slot.
    pub fn optional(self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.slot(name, kind, false, None)
    }

    /// Declare a slot that starts out holding `default`.
    pub fn with_default(self, name: impl Into<String>, default: Value, required: bool) -> Self {
        let kind = default.kind();
        self.slot(name, kind, required, Some(default))
    }

    fn slot(
        mut self,
        name: impl Into<String>,
        kind: ValueKind,
        required: bool,
        default: Option<Value>,
    ) -> Self {
        let name = name.into();
        self.attributes.retain(|spec| spec.name != name);
        self.attributes.push(AttributeSpec {
            name,
            kind,
            required,
            default,
        });
        self
    }

    /// Element tag.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Nesting behavior.
    #[inline]
    pub fn nesting(&self) -> Nesting {
        self.nesting
    }

    /// Whether the builder descends into children of this kind.
    #[inline]
    pub fn is_container(&self) -> bool {
        self.nesting == Nesting::Container
    }

    /// Attribute slots in declaration order.
    #[inline]
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    /// Construct a fresh element with every slot at its default.
    pub fn instantiate(&self) -> Element {
        Element::new(
            self.tag.clone(),
            self.attributes.iter().map(AttributeSpec::instantiate),
        )
    }
}

/// The built-in element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Document root, `<materialx>`.
    Document,
    Collection,
    CollectionAdd,
    GeomInfo,
    GeomAttr,
    Shader,
    CoShader,
    Parameter,
    Aov,
    AovSet,
    Material,
    ShaderRef,
    MaterialAssign,
    Look,
}

impl ElementKind {
    /// Every built-in kind.
    pub const ALL: [ElementKind; 14] = [
        Self::Document,
        Self::Collection,
        Self::CollectionAdd,
        Self::GeomInfo,
        Self::GeomAttr,
        Self::Shader,
        Self::CoShader,
        Self::Parameter,
        Self::Aov,
        Self::AovSet,
        Self::Material,
        Self::ShaderRef,
        Self::MaterialAssign,
        Self::Look,
    ];

    /// XML tag of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Document => "materialx",
            Self::Collection => "collection",
            Self::CollectionAdd => "collectionadd",
            Self::GeomInfo => "geominfo",
            Self::GeomAttr => "geomattr",
            Self::Shader => "shader",
            Self::CoShader => "coshader",
            Self::Parameter => "parameter",
            Self::Aov => "aov",
            Self::AovSet => "aovset",
            Self::Material => "material",
            Self::ShaderRef => "shaderref",
            Self::MaterialAssign => "materialassign",
            Self::Look => "look",
        }
    }

    /// Look up a built-in kind by tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Schema of this kind.
    pub fn schema(self) -> ElementSchema {
        let tag = self.tag();
        match self {
            Self::Document => ElementSchema::container(tag).with_default(
                "version",
                Value::from(crate::SUPPORTED_VERSION),
                true,
            ),
            Self::Collection | Self::AovSet | Self::ShaderRef | Self::Look => {
                ElementSchema::container(tag).required("name", ValueKind::String)
            }
            Self::CollectionAdd => ElementSchema::leaf(tag)
                .required("name", ValueKind::String)
                .required("geom", ValueKind::String)
                .optional("includechildren", ValueKind::Boolean),
            Self::GeomInfo => ElementSchema::container(tag)
                .required("name", ValueKind::String)
                .optional("geom", ValueKind::String)
                .optional("regex", ValueKind::String)
                .optional("collection", ValueKind::String),
            Self::GeomAttr => ElementSchema::leaf(tag)
                .required("name", ValueKind::String)
                .required("type", ValueKind::String)
                .optional("value", ValueKind::String),
            Self::Shader => ElementSchema::container(tag)
                .required("name", ValueKind::String)
                .required("shadertype", ValueKind::String)
                .required("shaderprogram", ValueKind::String)
                .optional("application", ValueKind::String)
                .optional("aovset", ValueKind::String)
                .optional("xpos", ValueKind::Float)
                .optional("ypos", ValueKind::Float)
                .optional("aovs", ValueKind::String)
                .optional("passaovs", ValueKind::String),
            Self::CoShader => ElementSchema::leaf(tag)
                .required("name", ValueKind::String)
                .required("shader", ValueKind::String)
                .optional("aovset", ValueKind::String)
                .optional("aovs", ValueKind::String),
            Self::Parameter => ElementSchema::leaf(tag)
                .required("name", ValueKind::String)
                .required("type", ValueKind::String)
                .optional("value", ValueKind::String)
                .optional("default", ValueKind::String)
                .optional("publicname", ValueKind::String),
            Self::Aov => ElementSchema::leaf(tag)
                .required("name", ValueKind::String)
                .required("type", ValueKind::String),
            Self::Material => ElementSchema::container(tag)
                .required("name", ValueKind::String)
                .optional("xpos", ValueKind::Float)
                .optional("ypos", ValueKind::Float),
            Self::MaterialAssign => ElementSchema::leaf(tag)
                .required("name", ValueKind::String)
                .optional("geom", ValueKind::String)
                .optional("collection", ValueKind::String)
                .optional("regex", ValueKind::String),
        }
    }

    /// Construct a fresh element of this kind.
    pub fn instantiate(self) -> Element {
        self.schema().instantiate()
    }
}

/// Mapping from element tag to schema, consulted once per input node.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: HashMap<String, ElementSchema>,
}

static BUILTIN: OnceLock<SchemaRegistry> = OnceLock::new();

impl SchemaRegistry {
    /// An empty registry: every tag is unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding every built-in kind that may appear below the root.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for kind in ElementKind::ALL {
            if kind != ElementKind::Document {
                registry.register(kind.schema());
            }
        }
        registry
    }

    /// The shared built-in registry, built on first use.
    pub fn global() -> &'static Self {
        BUILTIN.get_or_init(Self::builtin)
    }

    /// Add a schema, returning the one it replaces.
    pub fn register(&mut self, schema: ElementSchema) -> Option<ElementSchema> {
        self.entries.insert(schema.tag.clone(), schema)
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, schema: ElementSchema) -> Self {
        self.register(schema);
        self
    }

    /// Look up the schema for a tag.
    #[inline]
    pub fn get(&self, tag: &str) -> Option<&ElementSchema> {
        self.entries.get(tag)
    }

    /// Whether a tag is known.
    #[inline]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Construct a fresh element for a tag.
    pub fn create(&self, tag: &str) -> Result<Element> {
        self.get(tag)
            .map(ElementSchema::instantiate)
            .ok_or_else(|| Error::UnknownTag(tag.to_owned()))
    }

    /// Known tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no schemas.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
