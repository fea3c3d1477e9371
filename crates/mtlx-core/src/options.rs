//! Parse configuration.

/// Default maximum element nesting depth below the document root.
///
/// Real documents nest a handful of levels (look → materialassign,
/// shader → parameter). The limit applies to the XML reader and the tree
/// builder alike, known and unknown tags included, so hostile input cannot
/// exhaust the stack.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// What to do when an attribute literal does not match its value kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueErrorPolicy {
    /// Fail the whole parse on the first malformed attribute.
    #[default]
    Abort,
    /// Keep the attribute default, record the error and continue.
    Skip,
}

/// Options controlling how documents are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Handling of malformed attribute values.
    pub on_value_error: ValueErrorPolicy,
    /// Maximum element nesting depth below the document root, counting
    /// unknown elements.
    pub max_depth: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            on_value_error: ValueErrorPolicy::Abort,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReadOptions {
    /// Options that load as much of a malformed document as possible.
    pub fn lenient() -> Self {
        Self {
            on_value_error: ValueErrorPolicy::Skip,
            ..Self::default()
        }
    }
}
