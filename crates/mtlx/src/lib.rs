//! Mtlx - MaterialX document object model.
//!
//! This crate provides a unified interface to the mtlx crates:
//!
//! - [`mtlx_xml`] - XML node tree, reading and writing
//! - [`mtlx_core`] - Value codec, typed elements, schema registry, documents
//!
//! # Example
//!
//! ```
//! use mtlx::prelude::*;
//!
//! let xml = r#"<materialx version="1.0">
//!   <material name="lambert1SG"><shaderref name="lambert1"/></material>
//! </materialx>"#;
//!
//! let doc = Document::parse_str(xml)?;
//! let material = doc.get("lambert1SG").unwrap();
//! assert_eq!(material.child_keys().collect::<Vec<_>>(), ["lambert1"]);
//!
//! println!("{}", doc.to_xml_string(&WriteOptions::default())?);
//! # Ok::<(), mtlx::model::Error>(())
//! ```

// Re-export all sub-crates
pub use mtlx_core as model;
pub use mtlx_xml as xml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use mtlx_core::{
        Attribute, Document, Element, ElementKind, ElementSchema, ParseOutcome, ReadOptions,
        SchemaRegistry, Value, ValueErrorPolicy, ValueKind,
    };
    pub use mtlx_xml::{WriteOptions, XmlNode};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
