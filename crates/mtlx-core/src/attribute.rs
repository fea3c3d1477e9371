//! Typed attribute slots.

use crate::{Error, Result, Value, ValueKind, ValueParseError};

/// A named, typed value slot on an element.
///
/// The kind is fixed when the slot is created. A required slot may be unset
/// while a tree is being built or after a partial parse; it only becomes an
/// error when the element is serialized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    kind: ValueKind,
    required: bool,
    pub(crate) value: Option<Value>,
}

impl Attribute {
    /// Create an unset attribute slot.
    pub fn new(name: impl Into<String>, kind: ValueKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            value: None,
        }
    }

    /// Create an optional unset slot.
    pub fn optional(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(name, kind, false)
    }

    /// Create a required unset slot.
    pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(name, kind, true)
    }

    /// Attribute name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value kind this slot holds.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Canonical type tag of the slot kind.
    #[inline]
    pub fn type_tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Whether the slot must hold a value when serialized.
    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Current value, if any.
    #[inline]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Whether a value is present.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Parse `raw` with the slot kind and store the result.
    ///
    /// On failure the previous value is left untouched.
    pub fn set(&mut self, raw: &str) -> std::result::Result<(), ValueParseError> {
        self.value = Some(self.kind.parse(raw)?);
        Ok(())
    }

    /// Store an already decoded value.
    ///
    /// Values whose text form would not read back equal are refused, see
    /// [`Value::is_representable`].
    pub fn assign(&mut self, value: Value) -> Result<()> {
        if value.kind() != self.kind {
            return Err(Error::ValueKindMismatch {
                attribute: self.name.clone(),
                expected: self.kind,
                found: value.kind(),
            });
        }
        if !value.is_representable() {
            return Err(Error::UnrepresentableValue {
                attribute: self.name.clone(),
                value: value.to_string(),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    /// Builder form of [`assign`](Self::assign).
    pub fn with_value(mut self, value: Value) -> Result<Self> {
        self.assign(value)?;
        Ok(self)
    }

    /// Remove the value.
    pub fn clear(&mut self) -> Option<Value> {
        self.value.take()
    }

    /// Text form of the value, or `None` when unset.
    pub fn render(&self) -> Option<String> {
        self.value.as_ref().map(Value::to_string)
    }
}
