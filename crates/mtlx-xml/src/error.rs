//! Error types for XML reading and writing.

use thiserror::Error;

/// Errors that can occur when reading or writing XML text.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Tokenizer or writer error reported by quick-xml.
    #[error("XML error: {0}")]
    Xml(String),

    /// The input contained no element at all.
    #[error("no root element found in XML")]
    NoRoot,

    /// The input contained more than one top-level element.
    #[error("multiple root elements: found <{0}> after the document element")]
    MultipleRoots(String),

    /// Elements are nested deeper than the configured limit.
    #[error("element nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    /// The input ended while an element was still open.
    #[error("unexpected end of input inside <{0}>")]
    Unclosed(String),
}

/// Result type for XML operations.
pub type Result<T> = std::result::Result<T, Error>;
