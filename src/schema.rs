//! Schema types for describing resource attributes.
//!
//! Semantic string attributes appear in a schema as
//! [`AttributeType::Custom`] carrying the type's stable name, which is how
//! they are identified in the host's type registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::semantic::SemanticStringType;

/// The type of an attribute value. Only string-shaped types are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A plain string.
    String,
    /// A semantic string type, identified by its type name.
    Custom(String),
    /// A list of values of one type, e.g. the roles granted to a team.
    List(Box<AttributeType>),
}

impl AttributeType {
    /// Create a list type.
    pub fn list(element_type: AttributeType) -> Self {
        Self::List(Box::new(element_type))
    }

    /// The custom type for semantic string type `T`.
    pub fn semantic<T: SemanticStringType>() -> Self {
        Self::Custom(T::TYPE_NAME.to_string())
    }

    /// Whether values of this type are encoded as JSON strings.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Self::String | Self::Custom(_))
    }

    /// Name used in type diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Custom(type_name) => type_name,
            Self::List(_) => "list",
        }
    }
}

/// Describes how an attribute can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// The attribute is required in configuration.
    pub required: bool,
    /// The attribute is optional in configuration.
    pub optional: bool,
    /// The attribute is computed by the provider (read-only).
    pub computed: bool,
}

impl AttributeFlags {
    /// Create flags for a required attribute.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    /// Create flags for an optional attribute.
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Default::default()
        }
    }

    /// Create flags for a computed attribute (read-only, set by provider).
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Default::default()
        }
    }
}

/// Describes a single attribute in a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The type of the attribute.
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Flags describing how the attribute can be used.
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Human-readable description of the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    /// Create a new attribute with the given type and flags.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
        }
    }

    /// Create a required string attribute.
    pub fn required_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::required())
    }

    /// Create a computed string attribute.
    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::computed())
    }

    /// Create an attribute of semantic string type `T`.
    pub fn semantic<T: SemanticStringType>(flags: AttributeFlags) -> Self {
        Self::new(AttributeType::semantic::<T>(), flags)
    }

    /// Set the description for this attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Schema for a resource or data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schema {
    /// The version of this schema.
    #[serde(default)]
    pub version: u64,
    /// The attributes, by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Create a new schema with the given version.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            attributes: BTreeMap::new(),
        }
    }

    /// Create a schema at version 0.
    pub fn v0() -> Self {
        Self::new(0)
    }

    /// Add an attribute to the schema.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Names of the top-level attributes of semantic type `T`, in name order.
    pub fn semantic_attributes<T: SemanticStringType>(&self) -> Vec<&str> {
        let wanted = AttributeType::semantic::<T>();
        self.attributes
            .iter()
            .filter(|(_, attr)| attr.attr_type == wanted)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// An error that prevents the operation from completing.
    Error,
    /// A warning that doesn't prevent the operation but should be addressed.
    Warning,
}

/// A diagnostic message reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// A short summary of the issue.
    pub summary: String,
    /// A detailed description of the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The attribute path where the issue occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Add detail to this diagnostic.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the attribute path for this diagnostic.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleType;
    use crate::scope::SpaceType;

    #[test]
    fn test_attribute_type_constructors() {
        let list = AttributeType::list(AttributeType::String);
        assert!(matches!(list, AttributeType::List(_)));

        assert_eq!(list.name(), "list");
        assert_eq!(AttributeType::semantic::<SpaceType>().name(), "SpaceType");

        assert_eq!(
            AttributeType::semantic::<RoleType>(),
            AttributeType::Custom("RoleType".to_string())
        );
    }

    #[test]
    fn test_string_like() {
        assert!(AttributeType::String.is_string_like());
        assert!(AttributeType::semantic::<RoleType>().is_string_like());
        assert!(!AttributeType::list(AttributeType::String).is_string_like());
    }

    #[test]
    fn test_only_string_shaped_types_deserialize() {
        let list: AttributeType = serde_json::from_value(serde_json::json!({"list": "string"})).unwrap();
        assert_eq!(list, AttributeType::list(AttributeType::String));

        assert!(serde_json::from_value::<AttributeType>(serde_json::json!("int64")).is_err());
        assert!(serde_json::from_value::<AttributeType>(serde_json::json!({"map": "string"})).is_err());
    }

    #[test]
    fn test_attribute_flags() {
        let required = AttributeFlags::required();
        assert!(required.required);
        assert!(!required.optional);
        assert!(!required.computed);

        let computed = AttributeFlags::computed();
        assert!(!computed.required);
        assert!(computed.computed);
    }

    #[test]
    fn test_attribute_builders() {
        let attr = Attribute::semantic::<RoleType>(AttributeFlags::required())
            .with_description("The role granted to the service account");

        assert_eq!(attr.attr_type, AttributeType::Custom("RoleType".to_string()));
        assert!(attr.flags.required);
        assert!(attr.description.is_some());
    }

    #[test]
    fn test_semantic_attributes() {
        let schema = Schema::v0()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("role", Attribute::semantic::<RoleType>(AttributeFlags::required()))
            .with_attribute(
                "admin_role",
                Attribute::semantic::<RoleType>(AttributeFlags::optional()),
            )
            .with_attribute("space", Attribute::semantic::<SpaceType>(AttributeFlags::optional()));

        assert_eq!(schema.semantic_attributes::<RoleType>(), vec!["admin_role", "role"]);
        assert_eq!(schema.semantic_attributes::<SpaceType>(), vec!["space"]);
    }

    #[test]
    fn test_schema_serializes_type_name() {
        let schema = Schema::v0()
            .with_attribute("role", Attribute::semantic::<RoleType>(AttributeFlags::required()));
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["attributes"]["role"]["type"]["custom"], "RoleType");
        assert_eq!(json["attributes"]["role"]["required"], true);
    }

    #[test]
    fn test_diagnostic() {
        let err = Diagnostic::error("Invalid configuration")
            .with_detail("The role must not be empty")
            .with_attribute("role");

        assert_eq!(err.severity, DiagnosticSeverity::Error);
        assert_eq!(err.summary, "Invalid configuration");
        assert_eq!(err.detail, Some("The role must not be empty".to_string()));
        assert_eq!(err.attribute, Some("role".to_string()));
        assert_eq!(Diagnostic::warning("w").severity, DiagnosticSeverity::Warning);
    }
}
