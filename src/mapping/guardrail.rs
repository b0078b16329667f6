//! Guardrail state mapping.
//!
//! Severity travels as an integer on the wire but as a name in declared
//! state. Resource criteria require non-empty region and asset-type scopes,
//! so encode injects the wildcard set when the user declared neither and
//! decode erases it again.

use crate::client::guardrails::{
    CostCriteriaWire, GuardrailCriteriaWire, GuardrailRequest, GuardrailResponse,
    PolicyCriteriaWire, ResourceCriteriaWire, TagCriteriaWire,
};
use crate::error::ProviderError;
use crate::values::Value;

use super::{
    governance_severity_from_wire, governance_severity_to_wire, guardrail_severity_from_wire,
    guardrail_severity_to_wire, opt_string_list_value, opt_string_value, pattern_set_from_wire,
    pattern_set_to_wire, pattern_set_to_wire_or_wildcard, value_opt_string, value_opt_string_list,
};

/// Build the wire request from declared state.
pub fn encode(state: &Value) -> Result<GuardrailRequest, ProviderError> {
    let name = state
        .get("name")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("guardrail name is required".to_string()))?
        .to_string();
    let guardrail_type = state
        .get("type")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("guardrail type is required".to_string()))?
        .to_string();
    let severity_name = state
        .get("severity")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("guardrail severity is required".to_string()))?;

    Ok(GuardrailRequest {
        name,
        guardrail_type,
        severity: guardrail_severity_to_wire(severity_name)?,
        is_enabled: state.get("is_enabled").as_bool(),
        notification_id: value_opt_string(state.get("notification_id")),
        criteria: encode_criteria(state.get("criteria"))?,
    })
}

fn encode_criteria(criteria: &Value) -> Result<GuardrailCriteriaWire, ProviderError> {
    Ok(GuardrailCriteriaWire {
        workspaces: pattern_set_to_wire(criteria.get("workspaces"))?,
        repositories: pattern_set_to_wire(criteria.get("repositories"))?,
        branches: pattern_set_to_wire(criteria.get("branches"))?,
        labels: pattern_set_to_wire(criteria.get("labels"))?,
        cost: encode_cost(criteria.get("cost")),
        resource: encode_resource(criteria.get("resource"))?,
        tag: encode_tag(criteria.get("tag")),
        policy: encode_policy(criteria.get("policy"))?,
    })
}

fn encode_cost(cost: &Value) -> Option<CostCriteriaWire> {
    if cost.is_null() {
        return None;
    }
    Some(CostCriteriaWire {
        threshold_amount: cost.get("threshold_amount").as_float(),
        threshold_percentage: cost.get("threshold_percentage").as_float(),
    })
}

fn encode_resource(resource: &Value) -> Result<Option<ResourceCriteriaWire>, ProviderError> {
    if resource.is_null() {
        return Ok(None);
    }
    Ok(Some(ResourceCriteriaWire {
        actions: value_opt_string_list(resource.get("actions")),
        regions: Some(pattern_set_to_wire_or_wildcard(resource.get("regions"))?),
        asset_types: Some(pattern_set_to_wire_or_wildcard(resource.get("asset_types"))?),
        specific_resources: value_opt_string_list(resource.get("specific_resources")),
    }))
}

fn encode_tag(tag: &Value) -> Option<TagCriteriaWire> {
    if tag.is_null() {
        return None;
    }
    Some(TagCriteriaWire {
        required_tags: value_opt_string_list(tag.get("required_tags")),
        tag_enforcement_mode: value_opt_string(tag.get("tag_enforcement_mode")),
    })
}

fn encode_policy(policy: &Value) -> Result<Option<PolicyCriteriaWire>, ProviderError> {
    if policy.is_null() {
        return Ok(None);
    }
    let severity = match policy.get("severity").as_str() {
        Some(name) => Some(governance_severity_to_wire(name)?),
        None => None,
    };
    Ok(Some(PolicyCriteriaWire {
        policies: value_opt_string_list(policy.get("policies")),
        severity,
    }))
}

/// Build new state from the remote response.
pub fn decode(response: &GuardrailResponse, prior: &Value) -> Value {
    Value::object([
        ("id", Value::string(&response.id)),
        ("name", Value::string(&response.name)),
        ("type", Value::string(&response.guardrail_type)),
        ("severity", guardrail_severity_from_wire(response.severity)),
        (
            "is_enabled",
            match response.is_enabled {
                Some(b) => Value::Bool(b),
                None => Value::Null,
            },
        ),
        (
            "notification_id",
            opt_string_value(response.notification_id.as_deref()),
        ),
        (
            "criteria",
            decode_criteria(&response.criteria, prior.get("criteria")),
        ),
    ])
}

fn decode_criteria(wire: &GuardrailCriteriaWire, prior: &Value) -> Value {
    Value::object([
        (
            "workspaces",
            pattern_set_from_wire(wire.workspaces.as_ref(), prior.get("workspaces")),
        ),
        (
            "repositories",
            pattern_set_from_wire(wire.repositories.as_ref(), prior.get("repositories")),
        ),
        (
            "branches",
            pattern_set_from_wire(wire.branches.as_ref(), prior.get("branches")),
        ),
        (
            "labels",
            pattern_set_from_wire(wire.labels.as_ref(), prior.get("labels")),
        ),
        ("cost", decode_cost(wire.cost.as_ref())),
        (
            "resource",
            decode_resource(wire.resource.as_ref(), prior.get("resource")),
        ),
        ("tag", decode_tag(wire.tag.as_ref(), prior.get("tag"))),
        (
            "policy",
            decode_policy(wire.policy.as_ref(), prior.get("policy")),
        ),
    ])
}

fn decode_cost(wire: Option<&CostCriteriaWire>) -> Value {
    let Some(wire) = wire else {
        return Value::Null;
    };
    Value::object([
        (
            "threshold_amount",
            match wire.threshold_amount {
                Some(f) => Value::Float(f),
                None => Value::Null,
            },
        ),
        (
            "threshold_percentage",
            match wire.threshold_percentage {
                Some(f) => Value::Float(f),
                None => Value::Null,
            },
        ),
    ])
}

fn decode_resource(wire: Option<&ResourceCriteriaWire>, prior: &Value) -> Value {
    let Some(wire) = wire else {
        return Value::Null;
    };
    Value::object([
        (
            "actions",
            opt_string_list_value(wire.actions.as_ref(), prior.get("actions")),
        ),
        (
            "regions",
            pattern_set_from_wire(wire.regions.as_ref(), prior.get("regions")),
        ),
        (
            "asset_types",
            pattern_set_from_wire(wire.asset_types.as_ref(), prior.get("asset_types")),
        ),
        (
            "specific_resources",
            opt_string_list_value(
                wire.specific_resources.as_ref(),
                prior.get("specific_resources"),
            ),
        ),
    ])
}

fn decode_tag(wire: Option<&TagCriteriaWire>, prior: &Value) -> Value {
    let Some(wire) = wire else {
        return Value::Null;
    };
    Value::object([
        (
            "required_tags",
            opt_string_list_value(wire.required_tags.as_ref(), prior.get("required_tags")),
        ),
        (
            "tag_enforcement_mode",
            opt_string_value(wire.tag_enforcement_mode.as_deref()),
        ),
    ])
}

fn decode_policy(wire: Option<&PolicyCriteriaWire>, prior: &Value) -> Value {
    let Some(wire) = wire else {
        return Value::Null;
    };
    Value::object([
        (
            "policies",
            opt_string_list_value(wire.policies.as_ref(), prior.get("policies")),
        ),
        (
            "severity",
            match wire.severity {
                Some(s) => governance_severity_from_wire(s),
                None => Value::Null,
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PatternSetWire;

    fn cost_state() -> Value {
        Value::object([
            ("name", Value::string("monthly-cap")),
            ("type", Value::string("cost")),
            ("severity", Value::string("strict")),
            (
                "criteria",
                Value::object([(
                    "cost",
                    Value::object([("threshold_amount", Value::Float(500.0))]),
                )]),
            ),
        ])
    }

    #[test]
    fn test_encode_severity_name_to_integer() {
        let request = encode(&cost_state()).unwrap();
        assert_eq!(request.severity, 2);
        assert_eq!(request.guardrail_type, "cost");
        assert_eq!(
            request.criteria.cost.as_ref().unwrap().threshold_amount,
            Some(500.0)
        );
    }

    #[test]
    fn test_resource_criteria_injects_wildcards() {
        let state = Value::object([
            ("name", Value::string("no-deletes")),
            ("type", Value::string("resource")),
            ("severity", Value::string("flexible")),
            (
                "criteria",
                Value::object([(
                    "resource",
                    Value::object([("actions", Value::string_list(["delete"]))]),
                )]),
            ),
        ]);
        let request = encode(&state).unwrap();
        let resource = request.criteria.resource.unwrap();
        assert!(resource.regions.unwrap().is_wildcard());
        assert!(resource.asset_types.unwrap().is_wildcard());
    }

    #[test]
    fn test_decode_erases_injected_wildcard() {
        let response = GuardrailResponse {
            id: "g-1".to_string(),
            name: "no-deletes".to_string(),
            guardrail_type: "resource".to_string(),
            severity: 1,
            is_enabled: Some(true),
            notification_id: None,
            criteria: GuardrailCriteriaWire {
                resource: Some(ResourceCriteriaWire {
                    actions: Some(vec!["delete".to_string()]),
                    regions: Some(PatternSetWire::wildcard()),
                    asset_types: Some(PatternSetWire::wildcard()),
                    specific_resources: None,
                }),
                ..Default::default()
            },
        };
        let prior = Value::object([(
            "criteria",
            Value::object([(
                "resource",
                Value::object([("actions", Value::string_list(["delete"]))]),
            )]),
        )]);
        let state = decode(&response, &prior);
        let resource = state.get("criteria").get("resource");
        assert!(resource.get("regions").is_null());
        assert!(resource.get("asset_types").is_null());
        assert_eq!(state.get("severity").as_str(), Some("flexible"));
    }

    #[test]
    fn test_unknown_severity_integer_decodes_null() {
        let response = GuardrailResponse {
            id: "g-1".to_string(),
            name: "g".to_string(),
            guardrail_type: "cost".to_string(),
            severity: 7,
            is_enabled: None,
            notification_id: None,
            criteria: GuardrailCriteriaWire::default(),
        };
        assert!(decode(&response, &Value::Null).get("severity").is_null());
    }
}
