//! Space and organization attribute types.
//!
//! Like roles, spaces and organizations are accepted either by id or by MRN.

use std::borrow::Cow;

use crate::mrn::{self, ORGANIZATION_MRN_PREFIX, SPACE_MRN_PREFIX};
use crate::semantic::{SemanticString, SemanticStringType};

/// Marker for the space semantic string type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpaceType;

impl SemanticStringType for SpaceType {
    const TYPE_NAME: &'static str = "SpaceType";

    fn normalize(raw: &str) -> Cow<'_, str> {
        mrn::normalize(SPACE_MRN_PREFIX, raw)
    }
}

/// A space attribute value.
pub type SpaceValue = SemanticString<SpaceType>;

/// Marker for the organization semantic string type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OrganizationType;

impl SemanticStringType for OrganizationType {
    const TYPE_NAME: &'static str = "OrganizationType";

    fn normalize(raw: &str) -> Cow<'_, str> {
        mrn::normalize(ORGANIZATION_MRN_PREFIX, raw)
    }
}

/// An organization attribute value.
pub type OrganizationValue = SemanticString<OrganizationType>;

/// The space id of a space id or MRN.
pub fn space_id(space: &str) -> &str {
    mrn::strip(SPACE_MRN_PREFIX, space)
}

/// The organization id of an organization id or MRN.
pub fn organization_id(org: &str) -> &str {
    mrn::strip(ORGANIZATION_MRN_PREFIX, org)
}
