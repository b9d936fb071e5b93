//! The role attribute type.
//!
//! Roles can be declared by short name (`editor`) or by MRN
//! (`//iam.api.mondoo.app/roles/editor`). The API always answers with the
//! MRN, so comparing the two forms semantically keeps a configuration that
//! uses short names from showing drift after every refresh.

use std::borrow::Cow;

use crate::mrn::{self, ROLE_MRN_PREFIX};
use crate::semantic::{SemanticString, SemanticStringType};

/// Marker for the role semantic string type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleType;

impl SemanticStringType for RoleType {
    const TYPE_NAME: &'static str = "RoleType";

    fn normalize(raw: &str) -> Cow<'_, str> {
        normalize_role(raw)
    }
}

/// A role attribute value.
pub type RoleValue = SemanticString<RoleType>;

/// Expand a role name to its MRN. Empty strings and MRNs are unchanged.
pub fn normalize_role(role: &str) -> Cow<'_, str> {
    mrn::normalize(ROLE_MRN_PREFIX, role)
}

/// The short role name, for display.
pub fn role_name(role: &str) -> &str {
    mrn::strip(ROLE_MRN_PREFIX, role)
}
