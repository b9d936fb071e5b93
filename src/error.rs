//! Error types for Mondoo provider attribute types.

use thiserror::Error;

use crate::schema::Diagnostic;

/// Errors reported by attribute types to the host framework.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A value of an unexpected type was handed to a typed operation.
    ///
    /// This indicates an integration bug between the host and the attribute
    /// type, and is never folded into a "not equal" result.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The type the operation expected.
        expected: String,
        /// The type that was supplied.
        actual: String,
    },

    /// A validation error occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A validator was built from an invalid pattern.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request from the host.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Get the error message as a string.
    pub fn message(&self) -> String {
        match self {
            Self::TypeMismatch { expected, actual } => {
                format!("expected {}, got {}", expected, actual)
            },
            Self::Validation(msg) => msg.clone(),
            Self::InvalidPattern(err) => err.to_string(),
            Self::Serialization(err) => err.to_string(),
            Self::InvalidRequest(msg) => msg.clone(),
        }
    }

    /// Convert the error into an error diagnostic for diagnostic-based hosts.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::TypeMismatch { expected, actual } => {
                Diagnostic::error("Semantic Equality Check Error").with_detail(format!(
                    "An unexpected value type was received while performing semantic equality \
                     checks. Expected {}, got {}. This is always an issue with the provider \
                     and should be reported to the provider developers.",
                    expected, actual
                ))
            },
            other => Diagnostic::error(other.to_string()),
        }
    }
}

impl From<ProviderError> for tonic::Status {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::TypeMismatch { expected, actual } => tonic::Status::internal(format!(
                "Type mismatch: expected {}, got {}",
                expected, actual
            )),
            ProviderError::Validation(msg) => tonic::Status::invalid_argument(msg),
            ProviderError::InvalidPattern(err) => {
                tonic::Status::internal(format!("Invalid pattern: {}", err))
            },
            ProviderError::Serialization(err) => {
                tonic::Status::invalid_argument(format!("Serialization error: {}", err))
            },
            ProviderError::InvalidRequest(msg) => tonic::Status::invalid_argument(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiagnosticSeverity;

    #[test]
    fn test_error_display() {
        let err = ProviderError::type_mismatch("RoleType", "StringType");
        assert_eq!(
            format!("{}", err),
            "Type mismatch: expected RoleType, got StringType"
        );

        let err = ProviderError::Validation("invalid input".to_string());
        assert_eq!(format!("{}", err), "Validation error: invalid input");

        let err = ProviderError::InvalidRequest("bad request".to_string());
        assert_eq!(format!("{}", err), "Invalid request: bad request");
    }

    #[test]
    fn test_error_to_status() {
        let err = ProviderError::type_mismatch("RoleType", "StringType");
        let status: tonic::Status = err.into();
        assert_eq!(status.code(), tonic::Code::Internal);

        let err = ProviderError::Validation("test".to_string());
        let status: tonic::Status = err.into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);

        let err = ProviderError::InvalidRequest("test".to_string());
        let status: tonic::Status = err.into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_serialization_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ProviderError = json_err.into();
        assert!(matches!(err, ProviderError::Serialization(_)));

        let status: tonic::Status = err.into();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_invalid_pattern_from() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err: ProviderError = regex_err.into();
        assert!(err.to_string().starts_with("Invalid pattern"));
    }

    #[test]
    fn test_message_method() {
        let err = ProviderError::type_mismatch("RoleType", "StringType");
        assert_eq!(err.message(), "expected RoleType, got StringType");

        let err = ProviderError::Validation("invalid config".to_string());
        assert_eq!(err.message(), "invalid config");
    }

    #[test]
    fn test_to_diagnostic() {
        let diag = ProviderError::type_mismatch("RoleType", "StringType").to_diagnostic();
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.summary, "Semantic Equality Check Error");
        assert!(diag.detail.unwrap().contains("Expected RoleType, got StringType"));

        let diag = ProviderError::Validation("bad".to_string()).to_diagnostic();
        assert_eq!(diag.summary, "Validation error: bad");
        assert!(diag.detail.is_none());
    }
}
