//! Variable set state mapping.
//!
//! Secret variable values are write-only: the remote omits them on read, so
//! decode carries the declared value forward from prior state instead of
//! nulling it out.

use crate::client::variable_sets::{VariableSetRequest, VariableSetResponse, VariableWire};
use crate::error::ProviderError;
use crate::values::Value;

use super::{opt_string_list_value, opt_string_value, value_opt_string, value_opt_string_list};

/// Build the wire request from declared state.
pub fn encode(state: &Value) -> Result<VariableSetRequest, ProviderError> {
    let name = state
        .get("name")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("variable set name is required".to_string()))?
        .to_string();

    let mut variables = Vec::new();
    if let Some(items) = state.get("variables").as_list() {
        for item in items {
            variables.push(encode_variable(item)?);
        }
    }

    Ok(VariableSetRequest {
        name,
        description: value_opt_string(state.get("description")),
        labels: value_opt_string_list(state.get("labels")),
        parents: value_opt_string_list(state.get("parents")),
        variables,
    })
}

fn encode_variable(value: &Value) -> Result<VariableWire, ProviderError> {
    let key = value
        .get("key")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("variable key is required".to_string()))?
        .to_string();
    let sensitivity = value.get("sensitivity").as_str().unwrap_or("string");
    let destination = value.get("destination").as_str().unwrap_or("env");
    Ok(VariableWire {
        key,
        value: value_opt_string(value.get("value")),
        sensitivity: sensitivity.to_string(),
        destination: destination.to_string(),
    })
}

/// Build new state from the remote response.
pub fn decode(response: &VariableSetResponse, prior: &Value) -> Value {
    let prior_variables = prior.get("variables");
    let variables: Vec<Value> = response
        .variables
        .iter()
        .map(|wire| decode_variable(wire, prior_variables))
        .collect();

    Value::object([
        ("id", Value::string(&response.id)),
        ("name", Value::string(&response.name)),
        (
            "description",
            opt_string_value(response.description.as_deref()),
        ),
        (
            "labels",
            opt_string_list_value(response.labels.as_ref(), prior.get("labels")),
        ),
        (
            "parents",
            opt_string_list_value(response.parents.as_ref(), prior.get("parents")),
        ),
        ("variables", Value::List(variables)),
    ])
}

fn decode_variable(wire: &VariableWire, prior_variables: &Value) -> Value {
    let value = match &wire.value {
        Some(v) => Value::string(v),
        // Secrets come back without a value; echo the declared one.
        None => prior_variable_value(prior_variables, &wire.key),
    };
    Value::object([
        ("key", Value::string(&wire.key)),
        ("value", value),
        ("sensitivity", Value::string(&wire.sensitivity)),
        ("destination", Value::string(&wire.destination)),
    ])
}

fn prior_variable_value(prior_variables: &Value, key: &str) -> Value {
    let Some(items) = prior_variables.as_list() else {
        return Value::Null;
    };
    items
        .iter()
        .find(|item| item.get("key").as_str() == Some(key))
        .map(|item| item.get("value").clone())
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret_response() -> VariableSetResponse {
        VariableSetResponse {
            id: "vs-1".to_string(),
            name: "app".to_string(),
            description: None,
            labels: None,
            parents: None,
            variables: vec![VariableWire {
                key: "DB_PASSWORD".to_string(),
                value: None,
                sensitivity: "secret".to_string(),
                destination: "env".to_string(),
            }],
        }
    }

    #[test]
    fn test_secret_value_carried_from_prior() {
        let prior = Value::object([(
            "variables",
            Value::List(vec![Value::object([
                ("key", Value::string("DB_PASSWORD")),
                ("value", Value::string("hunter2")),
            ])]),
        )]);
        let state = decode(&secret_response(), &prior);
        let variables = state.get("variables").as_list().unwrap();
        assert_eq!(variables[0].get("value").as_str(), Some("hunter2"));
    }

    #[test]
    fn test_secret_value_null_without_prior() {
        let state = decode(&secret_response(), &Value::Null);
        let variables = state.get("variables").as_list().unwrap();
        assert!(variables[0].get("value").is_null());
    }

    #[test]
    fn test_encode_defaults_sensitivity_and_destination() {
        let state = Value::object([
            ("name", Value::string("app")),
            (
                "variables",
                Value::List(vec![Value::object([
                    ("key", Value::string("REGION")),
                    ("value", Value::string("us-east-1")),
                ])]),
            ),
        ]);
        let request = encode(&state).unwrap();
        assert_eq!(request.variables[0].sensitivity, "string");
        assert_eq!(request.variables[0].destination, "env");
    }
}
