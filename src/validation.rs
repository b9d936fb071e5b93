//! Configuration validation.
//!
//! Two layers of checks are provided:
//!
//! - [`validate`] checks a JSON configuration object against a [`Schema`]:
//!   required attributes are present and values have the declared types.
//!   Semantic string attributes must be JSON strings.
//! - [`StringValidator`]s check the content of string attributes, usually
//!   with a regular expression ([`RegexValidator`]). [`validate_with`] runs
//!   both layers.
//!
//! # Example
//!
//! ```
//! use mondoo_provider_types::role::RoleType;
//! use mondoo_provider_types::schema::{Attribute, AttributeFlags, Schema};
//! use mondoo_provider_types::validation::{validate_with, AttributeValidators, RegexValidator};
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("role", Attribute::semantic::<RoleType>(AttributeFlags::required()));
//! let validators = AttributeValidators::new().with("role", RegexValidator::role());
//!
//! assert!(validate_with(&schema, &validators, &json!({"role": "editor"})).is_empty());
//!
//! let diagnostics = validate_with(&schema, &validators, &json!({"role": "Editor!"}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("role".to_string()));
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;
use crate::mrn::{ORGANIZATION_MRN_PREFIX, ROLE_MRN_PREFIX, SPACE_MRN_PREFIX};
use crate::schema::{Attribute, AttributeType, Diagnostic, DiagnosticSeverity, Schema};
use crate::value::{json_type_name, StringValue};

/// Pattern for role names: lowercase words separated by dashes.
const ROLE_NAME_PATTERN: &str = r"[a-z][a-z0-9]*(-[a-z0-9]+)*";

/// Pattern for space and organization ids.
const SCOPE_ID_PATTERN: &str = r"[a-z0-9][a-z0-9-]{4,28}[a-z0-9]";

static ROLE: LazyLock<RegexValidator> = LazyLock::new(|| {
    RegexValidator::with_optional_prefix(
        ROLE_MRN_PREFIX,
        ROLE_NAME_PATTERN,
        "must be a role name such as 'editor' or a role MRN",
    )
    .expect("role pattern is valid")
});

static SPACE_ID: LazyLock<RegexValidator> = LazyLock::new(|| {
    RegexValidator::with_optional_prefix(
        SPACE_MRN_PREFIX,
        SCOPE_ID_PATTERN,
        "must be a space id or space MRN",
    )
    .expect("space pattern is valid")
});

static ORGANIZATION_ID: LazyLock<RegexValidator> = LazyLock::new(|| {
    RegexValidator::with_optional_prefix(
        ORGANIZATION_MRN_PREFIX,
        SCOPE_ID_PATTERN,
        "must be an organization id or organization MRN",
    )
    .expect("organization pattern is valid")
});

/// A check on the content of a string attribute.
pub trait StringValidator: Send + Sync {
    /// Human-readable description of what the validator accepts.
    fn description(&self) -> String;

    /// Check a known string, returning a diagnostic if it is invalid.
    fn validate_string(&self, path: &str, value: &str) -> Option<Diagnostic>;

    /// Check a string value. Null and unknown values are always accepted.
    fn validate_value(&self, path: &str, value: &StringValue) -> Option<Diagnostic> {
        value
            .as_known()
            .and_then(|known| self.validate_string(path, known))
    }
}

/// A validator that requires the whole string to match a regular expression.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    regex: Regex,
    message: String,
}

impl RegexValidator {
    /// Create a validator from a pattern.
    ///
    /// `message` completes the sentence "Attribute ... " in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidPattern`] if the pattern does not compile.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Create a validator accepting `id_pattern`, optionally preceded by the
    /// literal `prefix`. The pattern is anchored at both ends.
    pub fn with_optional_prefix(
        prefix: &str,
        id_pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let pattern = format!("^(?:{})?(?:{})$", regex::escape(prefix), id_pattern);
        Self::new(&pattern, message)
    }

    /// Role names or role MRNs.
    pub fn role() -> Self {
        ROLE.clone()
    }

    /// Space ids or space MRNs.
    pub fn space_id() -> Self {
        SPACE_ID.clone()
    }

    /// Organization ids or organization MRNs.
    pub fn organization_id() -> Self {
        ORGANIZATION_ID.clone()
    }

    /// Whether `value` matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl StringValidator for RegexValidator {
    fn description(&self) -> String {
        format!("value {}", self.message)
    }

    fn validate_string(&self, path: &str, value: &str) -> Option<Diagnostic> {
        if self.regex.is_match(value) {
            return None;
        }
        debug!(path, value, pattern = %self.regex, "string validation failed");
        Some(
            Diagnostic::error(format!("Invalid value for attribute '{}'", path))
                .with_detail(format!("Attribute {} {}, got: {}", path, self.message, value))
                .with_attribute(path),
        )
    }
}

/// String validators keyed by top-level attribute name.
#[derive(Clone, Default)]
pub struct AttributeValidators {
    validators: BTreeMap<String, Vec<Arc<dyn StringValidator>>>,
}

impl AttributeValidators {
    /// Create an empty set of validators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator for an attribute.
    pub fn with(mut self, name: impl Into<String>, validator: impl StringValidator + 'static) -> Self {
        self.validators
            .entry(name.into())
            .or_default()
            .push(Arc::new(validator));
        self
    }

    /// The validators registered for an attribute.
    pub fn for_attribute(&self, name: &str) -> &[Arc<dyn StringValidator>] {
        self.validators.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl std::fmt::Debug for AttributeValidators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.validators.iter().map(|(name, validators)| {
                let descriptions: Vec<String> =
                    validators.iter().map(|v| v.description()).collect();
                (name, descriptions)
            }))
            .finish()
    }
}

/// Validate a JSON configuration object against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the value is valid.
///
/// # Validation Rules
///
/// - Required attributes must be present and non-null
/// - Optional attributes may be absent or null
/// - Computed attributes are skipped (provider sets these)
/// - Attribute types must match the schema
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let obj = match value {
        Value::Object(map) => map,
        Value::Null => return diagnostics,
        _ => {
            diagnostics.push(
                Diagnostic::error("Expected object")
                    .with_detail(format!("Got {}", json_type_name(value))),
            );
            return diagnostics;
        },
    };

    for (name, attr) in &schema.attributes {
        validate_attribute(attr, obj.get(name), name, &mut diagnostics);
    }
    diagnostics
}

/// Validate a JSON configuration object against a schema and run the string
/// validators on the attributes that passed the type checks.
pub fn validate_with(
    schema: &Schema,
    validators: &AttributeValidators,
    value: &Value,
) -> Vec<Diagnostic> {
    let mut diagnostics = validate(schema, value);
    let Some(obj) = value.as_object() else {
        return diagnostics;
    };

    for (name, attr) in &schema.attributes {
        if !attr.attr_type.is_string_like() {
            continue;
        }
        if diagnostics
            .iter()
            .any(|d| d.attribute.as_deref() == Some(name.as_str()))
        {
            continue;
        }
        let Some(string_value) = StringValue::from_json(obj.get(name)) else {
            continue;
        };
        for validator in validators.for_attribute(name) {
            if let Some(diagnostic) = validator.validate_value(name, &string_value) {
                diagnostics.push(diagnostic);
            }
        }
    }
    diagnostics
}

/// Validate a JSON value against a schema, returning Ok if valid or Err with diagnostics.
///
/// This is a convenience wrapper around [`validate`] that returns a Result.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Check if a JSON value is valid against a schema.
///
/// Returns `true` if valid, `false` otherwise.
/// Use [`validate`] to get detailed error information.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // Computed-only attributes are set by the provider
    if attr.flags.computed && !attr.flags.optional && !attr.flags.required {
        return;
    }

    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
        },
        Some(v) => validate_attribute_type(&attr.attr_type, v, path, diagnostics),
    }
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String | AttributeType::Custom(_) => {
            if !value.is_string() {
                diagnostics.push(type_error(path, attr_type.name(), value));
            }
        },
        AttributeType::List(element_type) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}.{}", path, i);
                    validate_attribute_type(element_type, item, &item_path, diagnostics);
                }
            },
            None => diagnostics.push(type_error(path, attr_type.name(), value)),
        },
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic {
        severity: DiagnosticSeverity::Error,
        summary: format!("Invalid type for attribute '{}'", path),
        detail: Some(format!("Expected {}, got {}", expected, json_type_name(got))),
        attribute: Some(path.to_string()),
    }
}
