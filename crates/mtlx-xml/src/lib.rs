//! Minimal XML node tree for MaterialX documents.
//!
//! The object model in `mtlx-core` only needs a small slice of XML: element
//! tags, ordered attributes and ordered child elements. This crate provides
//! exactly that on top of `quick-xml`, in both directions.
//!
//! # Example
//!
//! ```
//! use mtlx_xml::{WriteOptions, XmlNode};
//!
//! let root = XmlNode::parse(r#"<materialx version="1.0"><look name="lookA"/></materialx>"#)?;
//! assert_eq!(root.tag, "materialx");
//! assert_eq!(root.attribute("version"), Some("1.0"));
//! assert_eq!(root.children.len(), 1);
//!
//! let text = root.to_xml_string(&WriteOptions::default())?;
//! assert!(text.contains("<look name=\"lookA\"/>"));
//! # Ok::<(), mtlx_xml::Error>(())
//! ```

mod error;
mod node;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use node::XmlNode;
pub use reader::DEFAULT_MAX_DEPTH;
pub use writer::WriteOptions;
