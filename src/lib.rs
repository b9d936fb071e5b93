//! Mondoo Provider Types
//!
//! Attribute types, validators and plan helpers for the Mondoo infrastructure
//! provider.
//!
//! # Overview
//!
//! Many Mondoo attributes accept an identifier in two forms: a short name
//! (`editor`) or a fully-qualified Mondoo resource name
//! (`//iam.api.mondoo.app/roles/editor`). The API always answers with the
//! MRN. Treating the two as different values would make every refresh report
//! drift for configurations written with short names.
//!
//! The crate provides:
//!
//! - **Semantic string values**: [`SemanticString`] with structural (raw) and
//!   semantic (normalized) equality, parameterized by a
//!   [`SemanticStringType`]
//! - **Concrete types**: [`RoleValue`], [`SpaceValue`], [`OrganizationValue`]
//! - **Plan helpers**: suppress changes between semantically equal values
//! - **Validation**: schema type checks and regex string validators
//! - **Error types**: [`ProviderError`], convertible to diagnostics and gRPC statuses
//! - **Logging**: Integration with `tracing` for structured logging
//!
//! # Quick Start
//!
//! ```
//! use mondoo_provider_types::{RoleValue, SemanticValue};
//!
//! let declared = RoleValue::new("editor");
//! let remote = RoleValue::new("//iam.api.mondoo.app/roles/editor");
//!
//! // Same role, different text
//! assert!(declared.semantic_equals(&remote)?);
//! assert_ne!(declared, remote);
//!
//! // What to send to the API
//! assert_eq!(declared.normalized_value(), "//iam.api.mondoo.app/roles/editor");
//! # Ok::<(), mondoo_provider_types::ProviderError>(())
//! ```
//!
//! Short names are recovered from MRNs for display:
//!
//! ```
//! use mondoo_provider_types::{organization_id, role_name, space_id};
//!
//! assert_eq!(role_name("//iam.api.mondoo.app/roles/editor"), "editor");
//! assert_eq!(space_id("//captain.api.mondoo.app/spaces/hungry-poet-123"), "hungry-poet-123");
//! assert_eq!(organization_id("lunalectric"), "lunalectric");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod logging;
pub mod mrn;
pub mod plan;
pub mod role;
pub mod schema;
pub mod scope;
pub mod semantic;
pub mod testing;
pub mod types;
pub mod validation;
pub mod value;

// Re-export main types at crate root
pub use error::ProviderError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use mrn::{ORGANIZATION_MRN_PREFIX, ROLE_MRN_PREFIX, SPACE_MRN_PREFIX};
pub use role::{normalize_role, role_name, RoleType, RoleValue};
pub use schema::{Diagnostic, DiagnosticSeverity, Schema};
pub use scope::{organization_id, space_id, OrganizationType, OrganizationValue, SpaceType, SpaceValue};
pub use semantic::{SemanticString, SemanticStringType, SemanticValue};
pub use types::{AttributeChange, PlanResult};
pub use validation::{is_valid, validate, validate_result, validate_with};
pub use value::{AttributeValue, StringValue};

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
