//! Mondoo resource names (MRNs).
//!
//! An MRN is a fully-qualified identifier such as
//! `//iam.api.mondoo.app/roles/editor`. Most attributes accept either the MRN
//! or its short form (`editor`); these helpers convert between the two.

use std::borrow::Cow;

/// Prefix of role MRNs. Part of the wire contract.
pub const ROLE_MRN_PREFIX: &str = "//iam.api.mondoo.app/roles/";

/// Prefix of space MRNs.
pub const SPACE_MRN_PREFIX: &str = "//captain.api.mondoo.app/spaces/";

/// Prefix of organization MRNs.
pub const ORGANIZATION_MRN_PREFIX: &str = "//captain.api.mondoo.app/organizations/";

/// Expand `value` to its canonical form under `prefix`.
///
/// The empty string is returned unchanged. A value that already starts with
/// `prefix` (case-sensitive) is returned unchanged, even if whatever follows
/// the prefix is malformed.
///
/// # Example
///
/// ```
/// use mondoo_provider_types::mrn::{normalize, ROLE_MRN_PREFIX};
///
/// assert_eq!(normalize(ROLE_MRN_PREFIX, "editor"), "//iam.api.mondoo.app/roles/editor");
/// assert_eq!(normalize(ROLE_MRN_PREFIX, ""), "");
/// ```
pub fn normalize<'a>(prefix: &str, value: &'a str) -> Cow<'a, str> {
    if value.is_empty() || value.starts_with(prefix) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("{}{}", prefix, value))
    }
}

/// Reduce `value` to its short form by removing `prefix`, if present.
pub fn strip<'a>(prefix: &str, value: &'a str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}
