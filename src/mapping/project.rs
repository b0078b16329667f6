//! Project state mapping.

use crate::client::projects::{ProjectRequest, ProjectResponse};
use crate::error::ProviderError;
use crate::values::Value;

use super::{opt_string_list_value, opt_string_value, value_opt_string, value_opt_string_list};

/// Build the wire request from declared state.
pub fn encode(state: &Value) -> Result<ProjectRequest, ProviderError> {
    let name = state
        .get("name")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("project name is required".to_string()))?
        .to_string();
    Ok(ProjectRequest {
        name,
        description: value_opt_string(state.get("description")),
        labels: value_opt_string_list(state.get("labels")),
    })
}

/// Build new state from the remote response, preserving the prior state's
/// null/empty distinctions.
pub fn decode(response: &ProjectResponse, prior: &Value) -> Value {
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
            "members_count",
            match response.members_count {
                Some(n) => Value::Int(n),
                None => Value::Null,
            },
        ),
    ])
}
