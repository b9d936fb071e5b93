//! Assertion helpers for provider tests.
//!
//! # Example
//!
//! ```
//! use mondoo_provider_types::role::RoleValue;
//! use mondoo_provider_types::testing::{assert_semantically_equal, assert_structurally_distinct};
//!
//! let declared = RoleValue::new("editor");
//! let remote = RoleValue::new("//iam.api.mondoo.app/roles/editor");
//!
//! assert_semantically_equal(&declared, &remote);
//! assert_structurally_distinct(&declared, &remote);
//! ```

use crate::schema::{Diagnostic, DiagnosticSeverity};
use crate::semantic::{SemanticString, SemanticStringType};
use crate::types::PlanResult;

/// Assert that two values are semantically equal.
///
/// # Panics
///
/// Panics if the normalized values differ.
pub fn assert_semantically_equal<T: SemanticStringType>(
    left: &SemanticString<T>,
    right: &SemanticString<T>,
) {
    assert!(
        left.semantic_eq(right),
        "Expected {} values to be semantically equal: {} ({}) vs {} ({})",
        T::TYPE_NAME,
        left,
        left.normalized_value(),
        right,
        right.normalized_value()
    );
}

/// Assert that two values are not semantically equal.
///
/// # Panics
///
/// Panics if the normalized values are equal.
pub fn assert_semantically_distinct<T: SemanticStringType>(
    left: &SemanticString<T>,
    right: &SemanticString<T>,
) {
    assert!(
        !left.semantic_eq(right),
        "Expected {} values to differ semantically, both normalize to {}",
        T::TYPE_NAME,
        left.normalized_value()
    );
}

/// Assert that two values are not structurally equal.
///
/// # Panics
///
/// Panics if the raw values are identical.
pub fn assert_structurally_distinct<T: SemanticStringType>(
    left: &SemanticString<T>,
    right: &SemanticString<T>,
) {
    assert!(
        !left.structural_eq(right),
        "Expected {} values to differ structurally, both are {}",
        T::TYPE_NAME,
        left
    );
}

/// Assert that a plan has no changes.
///
/// # Panics
///
/// Panics if the plan has changes.
pub fn assert_plan_no_changes(plan: &PlanResult) {
    assert!(
        !plan.has_changes(),
        "Expected no changes, but got {} change(s): {:?}",
        plan.changes.len(),
        plan.changes
    );
}

/// Assert that a plan changes a specific attribute.
///
/// # Panics
///
/// Panics if the attribute is not in the plan's changes.
pub fn assert_plan_changes_attribute(plan: &PlanResult, path: &str) {
    assert!(
        plan.change(path).is_some(),
        "Expected attribute '{}' to change, but it didn't. Changes: {:?}",
        path,
        plan.changes.iter().map(|c| &c.path).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if any diagnostic has error severity.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Error)
        .collect();
    assert!(
        errors.is_empty(),
        "Expected no errors, but got {}: {:?}",
        errors.len(),
        errors
    );
}

/// Assert that diagnostics contain at least one error.
///
/// # Panics
///
/// Panics if no diagnostic has error severity.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    assert!(
        diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error),
        "Expected errors, but got none"
    );
}

/// Assert that an error diagnostic's summary or detail contains a substring.
///
/// # Panics
///
/// Panics if no error diagnostic contains the substring.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let found = diagnostics.iter().any(|d| {
        d.severity == DiagnosticSeverity::Error
            && (d.summary.contains(substring)
                || d.detail.as_ref().is_some_and(|s| s.contains(substring)))
    });
    assert!(
        found,
        "Expected an error containing '{}', but none found. Diagnostics: {:?}",
        substring, diagnostics
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan_object;
    use crate::role::{RoleType, RoleValue};
    use crate::semantic::SemanticValue;
    use crate::value::StringValue;
    use serde_json::json;

    #[test]
    fn test_semantic_assertions() {
        let short = RoleValue::new("editor");
        let full = RoleValue::new("//iam.api.mondoo.app/roles/editor");
        assert_semantically_equal(&short, &full);
        assert_structurally_distinct(&short, &full);
        assert_semantically_distinct(&short, &RoleValue::new("viewer"));
    }

    #[test]
    #[should_panic(expected = "semantically equal")]
    fn test_assert_semantically_equal_fails() {
        assert_semantically_equal(&RoleValue::new("editor"), &RoleValue::new("viewer"));
    }

    #[test]
    #[should_panic(expected = "differ structurally")]
    fn test_assert_structurally_distinct_fails() {
        assert_structurally_distinct(&RoleValue::null(), &RoleValue::null());
    }

    #[test]
    fn test_plan_assertions() {
        let plan = plan_object::<RoleType>(
            Some(&json!({"role": "editor"})),
            &json!({"role": "//iam.api.mondoo.app/roles/editor"}),
            &["role"],
        )
        .unwrap();
        assert_plan_no_changes(&plan);

        let plan = plan_object::<RoleType>(
            Some(&json!({"role": "editor"})),
            &json!({"role": "viewer"}),
            &["role"],
        )
        .unwrap();
        assert_plan_changes_attribute(&plan, "role");
    }

    #[test]
    fn test_diagnostic_assertions() {
        assert_no_errors(&[Diagnostic::warning("just a warning")]);

        let err = RoleValue::new("editor")
            .semantic_equals(&StringValue::known("editor"))
            .unwrap_err();
        let diagnostics = vec![err.to_diagnostic()];
        assert_has_errors(&diagnostics);
        assert_error_contains(&diagnostics, "Expected RoleType, got StringType");
    }

    #[test]
    #[should_panic(expected = "Expected no errors")]
    fn test_assert_no_errors_fails() {
        assert_no_errors(&[Diagnostic::error("boom")]);
    }
}
