//! Governance policy and insight state mapping.
//!
//! Declared state carries Rego source in the clear; the wire carries it
//! base64-encoded. Severity names map to the six-level governance scale.

use crate::client::governance::{
    InsightRequest, InsightResponse, PolicyRequest, PolicyResponse,
};
use crate::error::ProviderError;
use crate::values::Value;

use super::{
    decode_code, encode_code, governance_severity_from_wire, governance_severity_to_wire,
    opt_string_list_value, opt_string_value, value_opt_string, value_opt_string_list,
};

fn required_str<'a>(state: &'a Value, attr: &str) -> Result<&'a str, ProviderError> {
    state
        .get(attr)
        .as_str()
        .ok_or_else(|| ProviderError::Mapping(format!("{} is required", attr)))
}

/// Build the wire request for a governance policy from declared state.
pub fn encode_policy(state: &Value) -> Result<PolicyRequest, ProviderError> {
    Ok(PolicyRequest {
        name: required_str(state, "name")?.to_string(),
        description: value_opt_string(state.get("description")),
        code: encode_code(required_str(state, "code")?),
        providers: value_opt_string_list(state.get("providers")),
        frameworks: value_opt_string_list(state.get("frameworks")),
        labels: value_opt_string_list(state.get("labels")),
        severity: governance_severity_to_wire(required_str(state, "severity")?)?,
        enabled: state.get("enabled").as_bool(),
    })
}

/// Build new governance policy state from the remote response.
pub fn decode_policy(response: &PolicyResponse, prior: &Value) -> Result<Value, ProviderError> {
    Ok(Value::object([
        ("id", Value::string(&response.id)),
        ("name", Value::string(&response.name)),
        (
            "description",
            opt_string_value(response.description.as_deref()),
        ),
        ("code", Value::string(decode_code(&response.code)?)),
        (
            "providers",
            opt_string_list_value(response.providers.as_ref(), prior.get("providers")),
        ),
        (
            "frameworks",
            opt_string_list_value(response.frameworks.as_ref(), prior.get("frameworks")),
        ),
        (
            "labels",
            opt_string_list_value(response.labels.as_ref(), prior.get("labels")),
        ),
        ("severity", governance_severity_from_wire(response.severity)),
        (
            "enabled",
            match response.enabled {
                Some(b) => Value::Bool(b),
                None => Value::Null,
            },
        ),
    ]))
}

/// Build the wire request for a governance insight from declared state.
pub fn encode_insight(state: &Value) -> Result<InsightRequest, ProviderError> {
    Ok(InsightRequest {
        name: required_str(state, "name")?.to_string(),
        description: value_opt_string(state.get("description")),
        code: encode_code(required_str(state, "code")?),
        providers: value_opt_string_list(state.get("providers")),
        category: value_opt_string(state.get("category")),
        labels: value_opt_string_list(state.get("labels")),
        severity: governance_severity_to_wire(required_str(state, "severity")?)?,
    })
}

/// Build new governance insight state from the remote response.
pub fn decode_insight(response: &InsightResponse, prior: &Value) -> Result<Value, ProviderError> {
    Ok(Value::object([
        ("id", Value::string(&response.id)),
        ("name", Value::string(&response.name)),
        (
            "description",
            opt_string_value(response.description.as_deref()),
        ),
        ("code", Value::string(decode_code(&response.code)?)),
        (
            "providers",
            opt_string_list_value(response.providers.as_ref(), prior.get("providers")),
        ),
        ("category", opt_string_value(response.category.as_deref())),
        (
            "labels",
            opt_string_list_value(response.labels.as_ref(), prior.get("labels")),
        ),
        ("severity", governance_severity_from_wire(response.severity)),
        (
            "is_default",
            match response.is_default {
                Some(b) => Value::Bool(b),
                None => Value::Null,
            },
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_code_round_trip() {
        let state = Value::object([
            ("name", Value::string("no-public-buckets")),
            ("code", Value::string("firefly { input.public == false }")),
            ("severity", Value::string("high")),
        ]);
        let request = encode_policy(&state).unwrap();
        assert_eq!(request.severity, 5);
        assert_ne!(request.code, "firefly { input.public == false }");

        let response = PolicyResponse {
            id: "pol-1".to_string(),
            name: "no-public-buckets".to_string(),
            description: None,
            code: request.code,
            providers: None,
            frameworks: None,
            labels: None,
            severity: 5,
            enabled: Some(true),
        };
        let decoded = decode_policy(&response, &Value::Null).unwrap();
        assert_eq!(
            decoded.get("code").as_str(),
            Some("firefly { input.public == false }")
        );
        assert_eq!(decoded.get("severity").as_str(), Some("high"));
    }

    #[test]
    fn test_invalid_code_fails_decode() {
        let response = PolicyResponse {
            id: "pol-1".to_string(),
            name: "p".to_string(),
            description: None,
            code: "!!not-base64!!".to_string(),
            providers: None,
            frameworks: None,
            labels: None,
            severity: 2,
            enabled: None,
        };
        assert!(matches!(
            decode_policy(&response, &Value::Null),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn test_insight_requires_severity() {
        let state = Value::object([
            ("name", Value::string("i")),
            ("code", Value::string("firefly { true }")),
        ]);
        assert!(encode_insight(&state).is_err());
    }
}
