//! String values with normalization-based equality.
//!
//! A semantic string type accepts more than one textual encoding of the same
//! thing, for example the short role name `editor` and the role MRN
//! `//iam.api.mondoo.app/roles/editor`. Values of such a type support two
//! equality relations:
//!
//! - **structural**: the raw strings are byte-equal ([`PartialEq`],
//!   [`SemanticString::structural_eq`]). Used for caching and set membership.
//! - **semantic**: the normalized projections are byte-equal
//!   ([`SemanticString::semantic_eq`], [`SemanticValue::semantic_equals`]).
//!   Used by the host to decide that a planned change is a no-op.
//!
//! # Example
//!
//! ```
//! use mondoo_provider_types::role::RoleValue;
//!
//! let declared = RoleValue::new("editor");
//! let remote = RoleValue::new("//iam.api.mondoo.app/roles/editor");
//!
//! assert!(declared.semantic_eq(&remote));
//! assert!(!declared.structural_eq(&remote));
//! assert_eq!(declared.normalized_value(), "//iam.api.mondoo.app/roles/editor");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{trace, warn};

use crate::error::ProviderError;
use crate::value::{json_type_name, AttributeValue, StringValue};

/// Type-level description of a semantic string type.
///
/// Implementors are zero-sized markers. They carry the stable type name
/// reported to the host's type registry and the normalization rule.
///
/// `normalize` must be total and idempotent, and must map `""` to `""`.
pub trait SemanticStringType:
    Copy + Eq + Hash + fmt::Debug + Default + Send + Sync + 'static
{
    /// Stable, distinguishable type name.
    const TYPE_NAME: &'static str;

    /// Project a raw string onto its canonical form.
    fn normalize(raw: &str) -> Cow<'_, str>;
}

/// Object-safe view of a semantic value, for hosts that hold values as
/// `&dyn SemanticValue`.
pub trait SemanticValue: AttributeValue {
    /// The canonical projection. Empty for null and unknown values.
    fn normalized_value(&self) -> Cow<'_, str>;

    /// Compare against another value of the same semantic type after
    /// normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::TypeMismatch`] if `other` is not a value of
    /// the same semantic type.
    fn semantic_equals(&self, other: &dyn AttributeValue) -> Result<bool, ProviderError>;
}

/// An immutable string attribute value of semantic type `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SemanticString<T: SemanticStringType> {
    value: StringValue,
    _type: PhantomData<T>,
}

impl<T: SemanticStringType> SemanticString<T> {
    /// Wrap a known raw string. The format is not validated.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::from_value(StringValue::Known(raw.into()))
    }

    /// An explicitly absent value.
    pub fn null() -> Self {
        Self::from_value(StringValue::Null)
    }

    /// A value that is not yet known.
    pub fn unknown() -> Self {
        Self::from_value(StringValue::Unknown)
    }

    /// Wrap a plain string value.
    pub fn from_value(value: StringValue) -> Self {
        Self {
            value,
            _type: PhantomData,
        }
    }

    /// The underlying plain string value.
    pub fn value(&self) -> &StringValue {
        &self.value
    }

    /// The raw string as supplied, if known.
    pub fn raw(&self) -> Option<&str> {
        self.value.as_known()
    }

    /// Whether the value is known.
    pub fn is_known(&self) -> bool {
        self.value.is_known()
    }

    /// The canonical projection to send to the remote API.
    ///
    /// Returns `""` for null and unknown values.
    pub fn normalized_value(&self) -> Cow<'_, str> {
        match &self.value {
            StringValue::Known(raw) => T::normalize(raw),
            StringValue::Null | StringValue::Unknown => Cow::Borrowed(""),
        }
    }

    /// Raw byte equality. Short and canonical forms are never structurally
    /// equal; two nulls are, and a null never equals an unknown.
    pub fn structural_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Equality of the normalized projections.
    pub fn semantic_eq(&self, other: &Self) -> bool {
        self.normalized_value() == other.normalized_value()
    }

    /// Build a value from an optional JSON attribute.
    ///
    /// A missing attribute or `null` is a null value and a string is a known
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::TypeMismatch`] for any other JSON type.
    pub fn from_json(value: Option<&serde_json::Value>) -> Result<Self, ProviderError> {
        match StringValue::from_json(value) {
            Some(v) => Ok(Self::from_value(v)),
            None => Err(ProviderError::type_mismatch(
                T::TYPE_NAME,
                value.map(json_type_name).unwrap_or("null"),
            )),
        }
    }

    /// The raw JSON encoding. Unknown values have none.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        self.value.to_json()
    }
}

impl<T: SemanticStringType> SemanticValue for SemanticString<T> {
    fn normalized_value(&self) -> Cow<'_, str> {
        SemanticString::normalized_value(self)
    }

    fn semantic_equals(&self, other: &dyn AttributeValue) -> Result<bool, ProviderError> {
        let Some(other) = other.as_any().downcast_ref::<Self>() else {
            warn!(
                expected = T::TYPE_NAME,
                actual = other.type_name(),
                "semantic equality requested against a foreign value type"
            );
            return Err(ProviderError::type_mismatch(T::TYPE_NAME, other.type_name()));
        };

        let equal = self.semantic_eq(other);
        trace!(
            type_name = T::TYPE_NAME,
            left = %self.value,
            right = %other.value,
            equal,
            "semantic equality"
        );
        Ok(equal)
    }
}

impl<T: SemanticStringType> AttributeValue for SemanticString<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn is_null(&self) -> bool {
        matches!(self.value, StringValue::Null)
    }

    fn is_unknown(&self) -> bool {
        matches!(self.value, StringValue::Unknown)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl<T: SemanticStringType> From<&str> for SemanticString<T> {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<T: SemanticStringType> From<String> for SemanticString<T> {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl<T: SemanticStringType> From<StringValue> for SemanticString<T> {
    fn from(value: StringValue) -> Self {
        Self::from_value(value)
    }
}

impl<T: SemanticStringType> fmt::Display for SemanticString<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<T: SemanticStringType> Serialize for SemanticString<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.value {
            StringValue::Known(raw) => serializer.serialize_str(raw),
            StringValue::Null => serializer.serialize_none(),
            StringValue::Unknown => Err(serde::ser::Error::custom(format!(
                "cannot serialize unknown {} value",
                T::TYPE_NAME
            ))),
        }
    }
}

impl<'de, T: SemanticStringType> Deserialize<'de> for SemanticString<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_value(raw.into()))
    }
}
