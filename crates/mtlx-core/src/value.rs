//! Value kinds and their string codec.
//!
//! Every attribute in a MaterialX document is text on the wire. A
//! [`ValueKind`] names how that text is interpreted, and [`Value`] holds the
//! decoded result. `kind.parse(raw)` and `value.to_string()` are inverse up to
//! numeric normalization: `"0.50"` reads as `0.5` and writes back as `"0.5"`.
//!
//! Tuple kinds (`color3`, `vector2`, ...) and array kinds hold their components
//! in a flat `Vec` and do not check the component count.

use std::fmt;
use std::str::FromStr;

use crate::ValueParseError;

/// The closed set of value kinds a MaterialX attribute can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    Integer,
    Boolean,
    Float,
    String,
    Filename,
    ShaderNode,
    Color2,
    Color3,
    Color4,
    Vector2,
    Vector3,
    Vector4,
    IntegerArray,
    FloatArray,
    Color2Array,
    Color3Array,
    Color4Array,
    Vector2Array,
    Vector3Array,
    Vector4Array,
    StringArray,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 21] = [
        Self::Integer,
        Self::Boolean,
        Self::Float,
        Self::String,
        Self::Filename,
        Self::ShaderNode,
        Self::Color2,
        Self::Color3,
        Self::Color4,
        Self::Vector2,
        Self::Vector3,
        Self::Vector4,
        Self::IntegerArray,
        Self::FloatArray,
        Self::Color2Array,
        Self::Color3Array,
        Self::Color4Array,
        Self::Vector2Array,
        Self::Vector3Array,
        Self::Vector4Array,
        Self::StringArray,
    ];

    /// Canonical type tag, as written in `type` attributes.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::String => "string",
            Self::Filename => "filename",
            Self::ShaderNode => "shadernode",
            Self::Color2 => "color2",
            Self::Color3 => "color3",
            Self::Color4 => "color4",
            Self::Vector2 => "vector2",
            Self::Vector3 => "vector3",
            Self::Vector4 => "vector4",
            Self::IntegerArray => "integerarray",
            Self::FloatArray => "floatarray",
            Self::Color2Array => "color2array",
            Self::Color3Array => "color3array",
            Self::Color4Array => "color4array",
            Self::Vector2Array => "vector2array",
            Self::Vector3Array => "vector3array",
            Self::Vector4Array => "vector4array",
            Self::StringArray => "stringarray",
        }
    }

    /// Look up a kind by its type tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Whether values of this kind are comma-separated component lists.
    pub fn is_list(self) -> bool {
        !matches!(
            self,
            Self::Integer | Self::Boolean | Self::Float | Self::String | Self::Filename | Self::ShaderNode
        )
    }

    /// Decode `raw` as a value of this kind.
    pub fn parse(self, raw: &str) -> Result<Value, ValueParseError> {
        let err = || ValueParseError::new(self, raw);

        let value = match self {
            Self::Integer => Value::Integer(parse_integer(raw).ok_or_else(err)?),
            Self::Boolean => Value::Boolean(parse_boolean(raw).ok_or_else(err)?),
            Self::Float => Value::Float(parse_float(raw).ok_or_else(err)?),
            Self::String => Value::String(raw.to_owned()),
            Self::Filename => Value::Filename(raw.to_owned()),
            Self::ShaderNode => Value::ShaderNode(raw.to_owned()),
            Self::IntegerArray => Value::IntegerArray(
                split_components(raw)
                    .map(parse_integer)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(err)?,
            ),
            Self::StringArray => Value::StringArray(split_escaped(raw)),
            _ => {
                let components = split_components(raw)
                    .map(parse_float)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(err)?;
                Value::from_components(self, components)
            }
        };

        Ok(value)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ValueKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| crate::Error::UnknownValueKind(s.to_owned()))
    }
}

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Float(f64),
    String(String),
    Filename(String),
    /// Name of another shader node.
    ShaderNode(String),
    Color2(Vec<f64>),
    Color3(Vec<f64>),
    Color4(Vec<f64>),
    Vector2(Vec<f64>),
    Vector3(Vec<f64>),
    Vector4(Vec<f64>),
    IntegerArray(Vec<i64>),
    FloatArray(Vec<f64>),
    /// Flattened color2 components.
    Color2Array(Vec<f64>),
    /// Flattened color3 components.
    Color3Array(Vec<f64>),
    /// Flattened color4 components.
    Color4Array(Vec<f64>),
    /// Flattened vector2 components.
    Vector2Array(Vec<f64>),
    /// Flattened vector3 components.
    Vector3Array(Vec<f64>),
    /// Flattened vector4 components.
    Vector4Array(Vec<f64>),
    /// Items are written comma-separated with literal commas escaped as `\,`.
    /// A backslash is never escaped, so an item ending in `\` that is
    /// followed by another item does not read back. See
    /// [`Value::is_representable`].
    StringArray(Vec<String>),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Filename(_) => ValueKind::Filename,
            Self::ShaderNode(_) => ValueKind::ShaderNode,
            Self::Color2(_) => ValueKind::Color2,
            Self::Color3(_) => ValueKind::Color3,
            Self::Color4(_) => ValueKind::Color4,
            Self::Vector2(_) => ValueKind::Vector2,
            Self::Vector3(_) => ValueKind::Vector3,
            Self::Vector4(_) => ValueKind::Vector4,
            Self::IntegerArray(_) => ValueKind::IntegerArray,
            Self::FloatArray(_) => ValueKind::FloatArray,
            Self::Color2Array(_) => ValueKind::Color2Array,
            Self::Color3Array(_) => ValueKind::Color3Array,
            Self::Color4Array(_) => ValueKind::Color4Array,
            Self::Vector2Array(_) => ValueKind::Vector2Array,
            Self::Vector3Array(_) => ValueKind::Vector3Array,
            Self::Vector4Array(_) => ValueKind::Vector4Array,
            Self::StringArray(_) => ValueKind::StringArray,
        }
    }

    /// Wrap float components as a value of a float-list kind.
    ///
    /// Non-float kinds fall back to a plain float array.
    pub(crate) fn from_components(kind: ValueKind, components: Vec<f64>) -> Self {
        match kind {
            ValueKind::Color2 => Self::Color2(components),
            ValueKind::Color3 => Self::Color3(components),
            ValueKind::Color4 => Self::Color4(components),
            ValueKind::Vector2 => Self::Vector2(components),
            ValueKind::Vector3 => Self::Vector3(components),
            ValueKind::Vector4 => Self::Vector4(components),
            ValueKind::Color2Array => Self::Color2Array(components),
            ValueKind::Color3Array => Self::Color3Array(components),
            ValueKind::Color4Array => Self::Color4Array(components),
            ValueKind::Vector2Array => Self::Vector2Array(components),
            ValueKind::Vector3Array => Self::Vector3Array(components),
            ValueKind::Vector4Array => Self::Vector4Array(components),
            _ => Self::FloatArray(components),
        }
    }

    /// Whether the text form of this value parses back to an equal value.
    ///
    /// Fails for non-finite floats, for a string array holding a single
    /// empty item (written as the empty list), and for a string array item
    /// ending in `\` that is not the last item.
    pub fn is_representable(&self) -> bool {
        match self {
            Self::Float(v) => v.is_finite(),
            Self::StringArray(items) => match items.as_slice() {
                [only] => !only.is_empty(),
                [init @ .., _] => !init.iter().any(|item| item.ends_with('\\')),
                [] => true,
            },
            other => other
                .as_floats()
                .map_or(true, |components| components.iter().all(|v| v.is_finite())),
        }
    }

    /// Try to get this value as an integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a float.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as text (string, filename or shader node).
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Filename(s) | Self::ShaderNode(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the float components of a tuple or float array.
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Self::Color2(v)
            | Self::Color3(v)
            | Self::Color4(v)
            | Self::Vector2(v)
            | Self::Vector3(v)
            | Self::Vector4(v)
            | Self::FloatArray(v)
            | Self::Color2Array(v)
            | Self::Color3Array(v)
            | Self::Color4Array(v)
            | Self::Vector2Array(v)
            | Self::Vector3Array(v)
            | Self::Vector4Array(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get this value as an integer array.
    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            Self::IntegerArray(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get this value as a string array.
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Boolean(v) => f.write_str(if *v { "true" } else { "false" }),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) | Self::Filename(s) | Self::ShaderNode(s) => f.write_str(s),
            Self::IntegerArray(v) => write_joined(f, v.iter()),
            Self::StringArray(v) => write_joined(f, v.iter().map(|s| s.replace(',', "\\,"))),
            other => match other.as_floats() {
                Some(components) => write_joined(f, components.iter()),
                None => Ok(()),
            },
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split a comma-separated list. Blank input is the empty list.
fn split_components(raw: &str) -> impl Iterator<Item = &str> {
    let raw = if raw.trim().is_empty() { None } else { Some(raw) };
    raw.into_iter().flat_map(|s| s.split(','))
}

/// Split on commas, treating `\,` as a literal comma.
fn split_escaped(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                chars.next();
                current.push(',');
            }
            ',' => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);

    items
}
