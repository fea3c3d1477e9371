//! Error types for the MaterialX object model.

use thiserror::Error;

use crate::ValueKind;

/// A literal that does not match the grammar of its value kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} literal: {raw:?}")]
pub struct ValueParseError {
    /// Kind the literal was parsed as.
    pub kind: ValueKind,
    /// The offending input text.
    pub raw: String,
}

impl ValueParseError {
    pub(crate) fn new(kind: ValueKind, raw: &str) -> Self {
        Self {
            kind,
            raw: raw.to_owned(),
        }
    }
}

/// Errors that can occur when building, parsing or serializing documents.
#[derive(Debug, Error)]
pub enum Error {
    /// XML reading or writing error.
    #[error(transparent)]
    Xml(#[from] mtlx_xml::Error),

    /// Malformed literal in an attribute.
    #[error("<{tag}> attribute '{attribute}': {source}")]
    InvalidAttribute {
        tag: String,
        attribute: String,
        #[source]
        source: ValueParseError,
    },

    /// A node was parsed into an element of a different kind.
    #[error("schema mismatch: expected <{expected}>, found <{found}>")]
    SchemaMismatch { expected: String, found: String },

    /// The document declares a version this crate does not read.
    #[error("unsupported document version {found:?} (supported: {supported:?})")]
    UnsupportedVersion {
        found: String,
        supported: &'static str,
    },

    /// An attribute needed to interpret the input is absent.
    #[error("<{tag}> is missing attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    /// A required attribute has no value at serialization time.
    #[error("<{tag}> required attribute '{attribute}' is unset")]
    MissingRequiredAttribute { tag: String, attribute: String },

    /// The element declares no attribute slot with this name.
    #[error("<{tag}> has no attribute '{attribute}'")]
    UnknownAttribute { tag: String, attribute: String },

    /// A value of the wrong kind was assigned to an attribute.
    #[error("attribute '{attribute}' holds {expected} values, got {found}")]
    ValueKindMismatch {
        attribute: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A value whose text form would read back as a different value.
    #[error("attribute '{attribute}' value {value:?} does not survive a write and re-read")]
    UnrepresentableValue { attribute: String, value: String },

    /// No schema entry exists for this tag.
    #[error("unknown element tag <{0}>")]
    UnknownTag(String),

    /// A `type` attribute names no known value kind.
    #[error("unknown value type {0:?}")]
    UnknownValueKind(String),

    /// Element nesting exceeds the configured limit.
    #[error("element nesting exceeds {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

/// Result type for object model operations.
pub type Result<T> = std::result::Result<T, Error>;
