//! Plan output types.

use serde::{Deserialize, Serialize};

/// A change to a single attribute during a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// The path to the attribute that changed.
    pub path: String,
    /// The value before the change (None if the attribute is being added).
    pub before: Option<serde_json::Value>,
    /// The value after the change (None if removed or not known until apply).
    pub after: Option<serde_json::Value>,
}

impl AttributeChange {
    /// Create a new attribute change.
    pub fn new(
        path: impl Into<String>,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        Self {
            path: path.into(),
            before,
            after,
        }
    }

    /// Create a change for a new attribute.
    pub fn added(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self::new(path, None, Some(value))
    }

    /// Create a change for a removed attribute.
    pub fn removed(path: impl Into<String>, value: serde_json::Value) -> Self {
        Self::new(path, Some(value), None)
    }

    /// Create a change for a modified attribute.
    pub fn modified(
        path: impl Into<String>,
        before: serde_json::Value,
        after: serde_json::Value,
    ) -> Self {
        Self::new(path, Some(before), Some(after))
    }
}

/// The outcome of planning a resource's attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// The state the host should plan, with semantically unchanged
    /// attributes carrying their prior form.
    pub planned_state: serde_json::Value,
    /// Attributes whose value actually changes.
    pub changes: Vec<AttributeChange>,
}

impl PlanResult {
    /// A plan that keeps `state` as is.
    pub fn no_change(state: serde_json::Value) -> Self {
        Self::new(state, Vec::new())
    }

    /// A plan with the given changes.
    pub fn new(planned_state: serde_json::Value, changes: Vec<AttributeChange>) -> Self {
        Self {
            planned_state,
            changes,
        }
    }

    /// Whether the plan changes anything.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// The change planned for `path`, if any.
    pub fn change(&self, path: &str) -> Option<&AttributeChange> {
        self.changes.iter().find(|c| c.path == path)
    }
}
