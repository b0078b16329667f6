//! The planning engine.
//!
//! Planning turns a proposed configuration plus optional prior state into a
//! planned state: defaults are applied, computed attributes become unknown
//! (or keep their prior value under `UseStateForUnknown`), and the diff
//! against prior state decides whether the change is in-place or forces
//! replacement.

use crate::schema::Schema;
use crate::values::Value;

/// A change to a single attribute during a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeChange {
    /// The path to the attribute that changed.
    pub path: String,
    /// The value before the change (`None` if creating or redacted).
    pub before: Option<Value>,
    /// The value after the change (`None` if deleting or redacted).
    pub after: Option<Value>,
}

impl AttributeChange {
    /// Create a new attribute change.
    pub fn new(path: impl Into<String>, before: Option<Value>, after: Option<Value>) -> Self {
        Self {
            path: path.into(),
            before,
            after,
        }
    }

    /// A change with both values withheld because the attribute is sensitive.
    pub fn redacted(path: impl Into<String>) -> Self {
        Self::new(path, None, None)
    }
}

/// The result of a plan operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// The planned state after the operation.
    pub planned_state: Value,
    /// The list of attribute changes.
    pub changes: Vec<AttributeChange>,
    /// Whether the resource requires replacement.
    pub requires_replace: bool,
}

impl PlanResult {
    /// Create a plan result with no changes.
    pub fn no_change(state: Value) -> Self {
        Self {
            planned_state: state,
            changes: Vec::new(),
            requires_replace: false,
        }
    }
}

/// Compute the planned state for a resource.
///
/// `prior_state` is `None` when the resource is being created. The proposed
/// state is the configuration after the host merged it with prior state.
pub fn plan_resource(schema: &Schema, prior_state: Option<&Value>, proposed: &Value) -> PlanResult {
    let planned = apply_modifiers(schema, prior_state, proposed);

    let mut changes = Vec::new();
    let mut requires_replace = false;

    for (name, attr) in &schema.block.attributes {
        let before = prior_state.map(|s| s.get(name).clone());
        let after = planned.get(name).clone();

        let changed = match &before {
            Some(prior) => !prior.eq_ignoring_unknown(&after),
            None => after.is_known(),
        };
        if !changed {
            continue;
        }

        if attr.forces_replacement() && prior_state.is_some() {
            requires_replace = true;
        }

        if attr.flags.sensitive {
            changes.push(AttributeChange::redacted(name.clone()));
        } else {
            changes.push(AttributeChange::new(name.clone(), before, Some(after)));
        }
    }

    for name in schema.block.blocks.keys() {
        let before = prior_state.map(|s| s.get(name).clone());
        let after = planned.get(name).clone();
        let changed = match &before {
            Some(prior) => !prior.eq_ignoring_unknown(&after),
            None => after.is_known(),
        };
        if changed {
            changes.push(AttributeChange::new(name.clone(), before, Some(after)));
        }
    }

    changes.sort_by(|a, b| a.path.cmp(&b.path));

    PlanResult {
        planned_state: planned,
        changes,
        requires_replace,
    }
}

/// Apply defaults and plan modifiers to a proposed state.
fn apply_modifiers(schema: &Schema, prior_state: Option<&Value>, proposed: &Value) -> Value {
    let mut planned = proposed.clone();

    for (name, attr) in &schema.block.attributes {
        let current = planned.get(name).clone();

        // Defaults fill optional attributes the user left null.
        if current.is_null() && attr.flags.optional {
            if let Some(default) = &attr.default {
                planned = planned.with(name.clone(), default.clone());
                continue;
            }
        }

        // Computed attributes the user cannot or did not set.
        if attr.flags.computed && !attr.flags.required && (current.is_null() || current.is_unknown())
        {
            let prior = prior_state.map(|s| s.get(name).clone());
            let resolved = match prior {
                Some(p) if attr.keeps_state_for_unknown() && p.is_known() => p,
                _ => Value::Unknown,
            };
            planned = planned.with(name.clone(), resolved);
        }
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Schema};

    fn project_schema() -> Schema {
        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string().use_state_for_unknown(),
            )
            .with_attribute("name", Attribute::required_string())
            .with_attribute("description", Attribute::optional_string())
            .with_attribute(
                "status",
                Attribute::optional_computed_string().with_default(Value::string("Active")),
            )
    }

    #[test]
    fn test_create_plan_marks_computed_unknown() {
        let schema = project_schema();
        let proposed = Value::object([("name", Value::string("proj-a"))]);
        let result = plan_resource(&schema, None, &proposed);

        assert!(result.planned_state.get("id").is_unknown());
        assert_eq!(result.planned_state.get("name").as_str(), Some("proj-a"));
        assert!(!result.requires_replace);
    }

    #[test]
    fn test_default_applied_when_null() {
        let schema = project_schema();
        let proposed = Value::object([("name", Value::string("proj-a"))]);
        let result = plan_resource(&schema, None, &proposed);
        assert_eq!(result.planned_state.get("status").as_str(), Some("Active"));
    }

    #[test]
    fn test_default_not_applied_when_set() {
        let schema = project_schema();
        let proposed = Value::object([
            ("name", Value::string("proj-a")),
            ("status", Value::string("Inactive")),
        ]);
        let result = plan_resource(&schema, None, &proposed);
        assert_eq!(result.planned_state.get("status").as_str(), Some("Inactive"));
    }

    #[test]
    fn test_use_state_for_unknown_keeps_prior_id() {
        let schema = project_schema();
        let prior = Value::object([
            ("id", Value::string("p-1")),
            ("name", Value::string("proj-a")),
            ("status", Value::string("Active")),
        ]);
        let proposed = Value::object([
            ("name", Value::string("proj-a")),
            ("status", Value::string("Active")),
        ]);
        let result = plan_resource(&schema, Some(&prior), &proposed);
        assert_eq!(result.planned_state.get("id").as_str(), Some("p-1"));
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_drift_produces_change() {
        let schema = project_schema();
        let prior = Value::object([
            ("id", Value::string("p-1")),
            ("name", Value::string("proj-a")),
            ("description", Value::string("e")),
            ("status", Value::string("Active")),
        ]);
        let proposed = Value::object([
            ("name", Value::string("proj-a")),
            ("description", Value::string("d")),
            ("status", Value::string("Active")),
        ]);
        let result = plan_resource(&schema, Some(&prior), &proposed);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].path, "description");
        assert_eq!(result.changes[0].before, Some(Value::string("e")));
        assert_eq!(result.changes[0].after, Some(Value::string("d")));
    }

    #[test]
    fn test_requires_replace() {
        let schema = Schema::v0()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("project_id", Attribute::required_string().requires_replace());

        let prior = Value::object([
            ("id", Value::string("m-1")),
            ("project_id", Value::string("p-1")),
        ]);
        let proposed = Value::object([("project_id", Value::string("p-2"))]);
        let result = plan_resource(&schema, Some(&prior), &proposed);
        assert!(result.requires_replace);
    }

    #[test]
    fn test_sensitive_change_is_redacted() {
        let schema = Schema::v0()
            .with_attribute("value", Attribute::required_string().sensitive());
        let prior = Value::object([("value", Value::string("old-secret"))]);
        let proposed = Value::object([("value", Value::string("new-secret"))]);
        let result = plan_resource(&schema, Some(&prior), &proposed);
        assert_eq!(result.changes.len(), 1);
        assert!(result.changes[0].before.is_none());
        assert!(result.changes[0].after.is_none());
    }

    #[test]
    fn test_no_change_for_equal_states() {
        let schema = project_schema();
        let state = Value::object([
            ("id", Value::string("p-1")),
            ("name", Value::string("proj-a")),
            ("status", Value::string("Active")),
        ]);
        let result = plan_resource(&schema, Some(&state), &state.clone());
        assert!(result.changes.is_empty());
        assert!(!result.requires_replace);
    }
}
