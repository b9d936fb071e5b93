//! Attribute values as seen by the host framework.
//!
//! Every attribute the host hands to a provider is in exactly one of three
//! states: explicitly absent (null), not yet resolved (unknown), or known.
//! [`StringValue`] encodes these as a tagged variant so that impossible
//! combinations such as "unknown with a raw string" cannot be constructed.

use std::any::Any;
use std::fmt;

/// Capability interface every attribute value exposes to the host.
///
/// The host uses [`AttributeValue::type_name`] for its type registry and
/// debug output, and [`AttributeValue::as_any`] when a typed comparison needs
/// to recover the concrete value behind a `&dyn AttributeValue`.
pub trait AttributeValue: fmt::Debug + Send + Sync + 'static {
    /// Stable, distinguishable name of the value's type.
    fn type_name(&self) -> &'static str;

    /// Whether the value is explicitly absent.
    fn is_null(&self) -> bool;

    /// Whether the value is not yet known.
    fn is_unknown(&self) -> bool;

    /// Access the concrete value for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A plain string attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StringValue {
    /// The attribute is explicitly absent.
    #[default]
    Null,
    /// The attribute depends on a value that has not been computed yet.
    Unknown,
    /// The attribute carries a string.
    Known(String),
}

impl StringValue {
    /// Wrap a known string.
    pub fn known(value: impl Into<String>) -> Self {
        Self::Known(value.into())
    }

    /// The known string, if any.
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Self::Known(s) => Some(s),
            Self::Null | Self::Unknown => None,
        }
    }

    /// Whether the value is known.
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Build a value from an optional JSON string.
    ///
    /// Returns `None` when the JSON value is neither `null` nor a string.
    pub fn from_json(value: Option<&serde_json::Value>) -> Option<Self> {
        match value {
            None | Some(serde_json::Value::Null) => Some(Self::Null),
            Some(serde_json::Value::String(s)) => Some(Self::Known(s.clone())),
            Some(_) => None,
        }
    }

    /// The JSON encoding of the value. Unknown values have none.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Null => Some(serde_json::Value::Null),
            Self::Unknown => None,
            Self::Known(s) => Some(serde_json::Value::String(s.clone())),
        }
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self::Known(value.to_string())
    }
}

impl From<String> for StringValue {
    fn from(value: String) -> Self {
        Self::Known(value)
    }
}

impl From<Option<String>> for StringValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Known)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("<null>"),
            Self::Unknown => f.write_str("<unknown>"),
            Self::Known(s) => f.write_str(s),
        }
    }
}

impl AttributeValue for StringValue {
    fn type_name(&self) -> &'static str {
        "StringType"
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// JSON type name used in diagnostics and type mismatch errors.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
