//! Typed object model for MaterialX documents.
//!
//! A MaterialX document describes shaders, materials, looks, geometry
//! attributes and collections as XML. This crate reads such a document into a
//! tree of [`Element`]s whose attributes are typed [`Value`]s, and writes the
//! tree back out.
//!
//! # Example
//!
//! ```
//! use mtlx_core::{Document, Element, WriteOptions};
//!
//! let doc = Document::new()
//!     .with(Element::collection("xyzCol").with_child(Element::collection_add("xyzColAdd", "/pCube1")))
//!     .with(Element::look("lookA").with_child(
//!         Element::material_assign("lambert1SG").with("collection", "xyzCol")?,
//!     ));
//!
//! let xml = doc.to_xml_string(&WriteOptions::default())?;
//! let reparsed = Document::parse_str(&xml)?;
//! assert_eq!(doc, reparsed);
//! # Ok::<(), mtlx_core::Error>(())
//! ```
//!
//! # Architecture
//!
//! - **Values** ([`ValueKind`], [`Value`]): the closed set of attribute types and their text codec
//! - **Attributes** ([`Attribute`]): named, typed, optionally required slots
//! - **Elements** ([`Element`]): ordered attribute slots plus ordered, named children
//! - **Schema** ([`SchemaRegistry`], [`ElementSchema`]): tag → slots and nesting rule
//! - **Document** ([`Document`]): the `<materialx>` root and the recursive builder
//!
//! # Error policy
//!
//! Unknown attributes and unknown child tags are ignored. Malformed values
//! abort the parse unless [`ReadOptions::on_value_error`] is
//! [`ValueErrorPolicy::Skip`], in which case they are reported in
//! [`ParseOutcome::skipped`]. Required attributes are only enforced when
//! serializing.

mod attribute;
mod constructors;
mod document;
mod element;
mod error;
mod options;
mod schema;
mod value;

pub use attribute::Attribute;
pub use document::{Document, ParseOutcome, SUPPORTED_VERSION};
pub use element::{Descendants, Element, SkippedValue};
pub use error::{Error, Result, ValueParseError};
pub use options::{ReadOptions, ValueErrorPolicy, DEFAULT_MAX_DEPTH};
pub use schema::{AttributeSpec, ElementKind, ElementSchema, Nesting, SchemaRegistry};
pub use value::{Value, ValueKind};

pub use mtlx_xml::{WriteOptions, XmlNode};
