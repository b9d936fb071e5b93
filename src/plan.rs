//! Drift suppression for semantic string attributes.
//!
//! When the prior state and the proposed configuration hold semantically equal
//! values (for example `editor` and its role MRN), the attribute is not a
//! change and the planned state keeps the prior raw form, so neither a plan
//! nor a refresh reports drift.
//!
//! # Example
//!
//! ```
//! use mondoo_provider_types::plan::plan_object;
//! use mondoo_provider_types::role::RoleType;
//! use serde_json::json;
//!
//! let prior = json!({"role": "//iam.api.mondoo.app/roles/editor"});
//! let proposed = json!({"role": "editor"});
//!
//! let plan = plan_object::<RoleType>(Some(&prior), &proposed, &["role"]).unwrap();
//! assert!(plan.changes.is_empty());
//! assert_eq!(plan.planned_state["role"], "//iam.api.mondoo.app/roles/editor");
//! ```

use serde_json::Value;
use tracing::debug;

use crate::error::ProviderError;
use crate::semantic::{SemanticString, SemanticStringType};
use crate::types::{AttributeChange, PlanResult};
use crate::value::{json_type_name, AttributeValue};

/// The change from `prior` to `proposed`, if any.
///
/// A proposed unknown value is always a change, reported with no `after`
/// value. An unknown prior is a change with no `before` value. Known values
/// that are semantically equal are not a change.
pub fn diff<T: SemanticStringType>(
    path: &str,
    prior: &SemanticString<T>,
    proposed: &SemanticString<T>,
) -> Option<AttributeChange> {
    let change = match (prior.raw(), proposed.raw()) {
        _ if proposed.is_unknown() => Some(AttributeChange::new(path, prior.to_json(), None)),
        _ if prior.is_unknown() => Some(AttributeChange::new(path, None, proposed.to_json())),
        (None, None) => None,
        (None, Some(after)) => Some(AttributeChange::added(path, after.into())),
        (Some(before), None) => Some(AttributeChange::removed(path, before.into())),
        (Some(before), Some(after)) => {
            if prior.semantic_eq(proposed) {
                None
            } else {
                Some(AttributeChange::modified(path, before.into(), after.into()))
            }
        },
    };

    debug!(
        path,
        type_name = T::TYPE_NAME,
        changed = change.is_some(),
        "planned semantic attribute"
    );
    change
}

/// The value to plan for an attribute.
///
/// Keeps `prior` when both values are known and semantically equal, and takes
/// `proposed` otherwise.
pub fn planned_value<T: SemanticStringType>(
    prior: &SemanticString<T>,
    proposed: &SemanticString<T>,
) -> SemanticString<T> {
    if prior.is_known() && proposed.is_known() && prior.semantic_eq(proposed) {
        prior.clone()
    } else {
        proposed.clone()
    }
}

/// The value to store after reading a resource back from the API.
///
/// The API answers in canonical form; if that is semantically equal to what is
/// in state, the stored form is kept.
pub fn preserve_prior<T: SemanticStringType>(
    prior: &SemanticString<T>,
    remote: SemanticString<T>,
) -> SemanticString<T> {
    if prior.is_known() && remote.is_known() && prior.semantic_eq(&remote) {
        prior.clone()
    } else {
        remote
    }
}

/// Plan the listed string attributes of a resource object.
///
/// `planned_state` is `proposed` with each listed attribute replaced by its
/// [`planned_value`]. Unknown values cannot be carried in JSON, so a listed
/// attribute is planned as unknown by the host and never appears here as one.
///
/// # Errors
///
/// Returns [`ProviderError::TypeMismatch`] when `prior` or `proposed` is not an
/// object, or a listed attribute holds something other than a string or null.
pub fn plan_object<T: SemanticStringType>(
    prior: Option<&Value>,
    proposed: &Value,
    attributes: &[&str],
) -> Result<PlanResult, ProviderError> {
    let prior = match prior {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            return Err(ProviderError::type_mismatch("object", json_type_name(other)))
        },
    };
    let Value::Object(proposed_map) = proposed else {
        return Err(ProviderError::type_mismatch("object", json_type_name(proposed)));
    };

    let mut planned_state = proposed_map.clone();
    let mut changes = Vec::new();

    for &name in attributes {
        let proposed_value = SemanticString::<T>::from_json(proposed_map.get(name))?;
        let Some(prior) = prior else {
            if let Some(raw) = proposed_value.raw() {
                changes.push(AttributeChange::added(name, raw.into()));
            }
            continue;
        };

        let prior_value = SemanticString::<T>::from_json(prior.get(name))?;
        if let Some(change) = diff(name, &prior_value, &proposed_value) {
            changes.push(change);
        }
        if let Some(planned) = planned_value(&prior_value, &proposed_value).to_json() {
            if !planned.is_null() || planned_state.contains_key(name) {
                planned_state.insert(name.to_string(), planned);
            }
        }
    }

    Ok(PlanResult::new(Value::Object(planned_state), changes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{RoleType, RoleValue};
    use crate::scope::SpaceType;
    use serde_json::json;

    const EDITOR_MRN: &str = "//iam.api.mondoo.app/roles/editor";

    #[test]
    fn test_diff_semantically_equal_is_no_change() {
        let change = diff("role", &RoleValue::new(EDITOR_MRN), &RoleValue::new("editor"));
        assert!(change.is_none());
    }

    #[test]
    fn test_diff_modified() {
        let change = diff("role", &RoleValue::new("editor"), &RoleValue::new("viewer")).unwrap();
        assert_eq!(change.before, Some(json!("editor")));
        assert_eq!(change.after, Some(json!("viewer")));
    }

    #[test]
    fn test_diff_added_and_removed() {
        let added = diff("role", &RoleValue::null(), &RoleValue::new("editor")).unwrap();
        assert!(added.before.is_none());
        assert_eq!(added.after, Some(json!("editor")));

        let removed = diff("role", &RoleValue::new("editor"), &RoleValue::null()).unwrap();
        assert_eq!(removed.before, Some(json!("editor")));
        assert!(removed.after.is_none());

        assert!(diff("role", &RoleValue::null(), &RoleValue::null()).is_none());
    }

    #[test]
    fn test_diff_unknown_is_always_a_change() {
        let change = diff("role", &RoleValue::new("editor"), &RoleValue::unknown()).unwrap();
        assert_eq!(change.before, Some(json!("editor")));
        assert!(change.after.is_none());

        let change = diff("role", &RoleValue::null(), &RoleValue::unknown()).unwrap();
        assert_eq!(change.before, Some(json!(null)));
    }

    #[test]
    fn test_diff_unknown_prior_keeps_proposed_value() {
        let change = diff("role", &RoleValue::unknown(), &RoleValue::new("editor")).unwrap();
        assert!(change.before.is_none());
        assert_eq!(change.after, Some(json!("editor")));

        let change = diff("role", &RoleValue::unknown(), &RoleValue::null()).unwrap();
        assert!(change.before.is_none());
        assert_eq!(change.after, Some(json!(null)));

        let change = diff("role", &RoleValue::unknown(), &RoleValue::unknown()).unwrap();
        assert!(change.before.is_none());
        assert!(change.after.is_none());
    }

    #[test]
    fn test_planned_value_keeps_prior_form() {
        let planned = planned_value(&RoleValue::new(EDITOR_MRN), &RoleValue::new("editor"));
        assert_eq!(planned.raw(), Some(EDITOR_MRN));

        let planned = planned_value(&RoleValue::new("editor"), &RoleValue::new("viewer"));
        assert_eq!(planned.raw(), Some("viewer"));

        let planned = planned_value(&RoleValue::new("editor"), &RoleValue::unknown());
        assert!(planned.is_unknown());
    }

    #[test]
    fn test_preserve_prior_on_read() {
        let stored = preserve_prior(&RoleValue::new("editor"), RoleValue::new(EDITOR_MRN));
        assert_eq!(stored.raw(), Some("editor"));

        let viewer = "//iam.api.mondoo.app/roles/viewer";
        let stored = preserve_prior(&RoleValue::new("editor"), RoleValue::new(viewer));
        assert_eq!(stored.raw(), Some(viewer));

        let stored = preserve_prior(&RoleValue::null(), RoleValue::new(EDITOR_MRN));
        assert_eq!(stored.raw(), Some(EDITOR_MRN));
    }

    #[test]
    fn test_plan_object_no_drift() {
        let prior = json!({"id": "sa-1", "role": EDITOR_MRN});
        let proposed = json!({"id": "sa-1", "role": "editor"});

        let plan = plan_object::<RoleType>(Some(&prior), &proposed, &["role"]).unwrap();
        assert!(!plan.has_changes());
        assert_eq!(plan.planned_state["role"], EDITOR_MRN);
        assert_eq!(plan.planned_state["id"], "sa-1");
    }

    #[test]
    fn test_plan_object_with_change() {
        let prior = json!({"role": "editor"});
        let proposed = json!({"role": "viewer"});

        let plan = plan_object::<RoleType>(Some(&prior), &proposed, &["role"]).unwrap();
        assert_eq!(plan.changes.len(), 1);
        assert_eq!(plan.changes[0].path, "role");
        assert_eq!(plan.planned_state["role"], "viewer");
    }

    #[test]
    fn test_plan_object_create() {
        let proposed = json!({"space": "my-space", "other": null});

        let plan = plan_object::<SpaceType>(None, &proposed, &["space", "other"]).unwrap();
        assert_eq!(plan.changes.len(), 1);
        assert_eq!(plan.changes[0], AttributeChange::added("space", json!("my-space")));
        assert_eq!(plan.planned_state, proposed);
    }

    #[test]
    fn test_plan_object_removed_attribute() {
        let prior = json!({"role": "editor"});
        let proposed = json!({});

        let plan = plan_object::<RoleType>(Some(&prior), &proposed, &["role"]).unwrap();
        assert_eq!(plan.changes, vec![AttributeChange::removed("role", json!("editor"))]);
        assert!(plan.planned_state.get("role").is_none());
    }

    #[test]
    fn test_plan_object_type_mismatch() {
        let err = plan_object::<RoleType>(None, &json!("role"), &["role"]).unwrap_err();
        assert!(matches!(err, ProviderError::TypeMismatch { .. }));

        let err = plan_object::<RoleType>(None, &json!({"role": 3}), &["role"]).unwrap_err();
        assert_eq!(err.message(), "expected RoleType, got number");

        let err =
            plan_object::<RoleType>(Some(&json!([])), &json!({}), &["role"]).unwrap_err();
        assert_eq!(err.message(), "expected object, got array");
    }
}
