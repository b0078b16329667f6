//! Runners workspace state mapping.

use crate::client::runners::{RunnersWorkspaceRequest, RunnersWorkspaceResponse};
use crate::error::ProviderError;
use crate::values::Value;

use super::{opt_string_list_value, opt_string_value, value_opt_string, value_opt_string_list};

/// Build the wire request from declared state.
pub fn encode(state: &Value) -> Result<RunnersWorkspaceRequest, ProviderError> {
    let name = state
        .get("name")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("runners workspace name is required".to_string()))?
        .to_string();
    Ok(RunnersWorkspaceRequest {
        name,
        description: value_opt_string(state.get("description")),
        repository: value_opt_string(state.get("repository")),
        vcs_integration_id: value_opt_string(state.get("vcs_integration_id")),
        branch: value_opt_string(state.get("branch")),
        working_directory: value_opt_string(state.get("working_directory")),
        iac_type: value_opt_string(state.get("iac_type")),
        iac_version: value_opt_string(state.get("iac_version")),
        labels: value_opt_string_list(state.get("labels")),
        variable_set_ids: value_opt_string_list(state.get("variable_set_ids")),
        apply_rule: value_opt_string(state.get("apply_rule")),
    })
}

/// Build new state from the remote response.
pub fn decode(response: &RunnersWorkspaceResponse, prior: &Value) -> Value {
    Value::object([
        ("id", Value::string(&response.id)),
        ("name", Value::string(&response.name)),
        (
            "description",
            opt_string_value(response.description.as_deref()),
        ),
        (
            "repository",
            opt_string_value(response.repository.as_deref()),
        ),
        (
            "vcs_integration_id",
            opt_string_value(response.vcs_integration_id.as_deref()),
        ),
        ("branch", opt_string_value(response.branch.as_deref())),
        (
            "working_directory",
            opt_string_value(response.working_directory.as_deref()),
        ),
        ("iac_type", opt_string_value(response.iac_type.as_deref())),
        (
            "iac_version",
            opt_string_value(response.iac_version.as_deref()),
        ),
        (
            "labels",
            opt_string_list_value(response.labels.as_ref(), prior.get("labels")),
        ),
        (
            "variable_set_ids",
            opt_string_list_value(
                response.variable_set_ids.as_ref(),
                prior.get("variable_set_ids"),
            ),
        ),
        (
            "apply_rule",
            opt_string_value(response.apply_rule.as_deref()),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_folds_cleared_fields_to_null() {
        let response = RunnersWorkspaceResponse {
            id: "rw-1".to_string(),
            name: "infra".to_string(),
            description: Some(String::new()),
            repository: Some("org/infra".to_string()),
            vcs_integration_id: None,
            branch: Some("main".to_string()),
            working_directory: None,
            iac_type: Some("terraform".to_string()),
            iac_version: None,
            labels: None,
            variable_set_ids: None,
            apply_rule: None,
        };
        let state = decode(&response, &Value::Null);
        assert!(state.get("description").is_null());
        assert_eq!(state.get("repository").as_str(), Some("org/infra"));
        assert!(state.get("labels").is_null());
    }
}
