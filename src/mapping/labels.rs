//! Workspace labels state mapping.
//!
//! The entity manages the full label list of an existing workspace; its
//! state id is the workspace id, and update is a wholesale replacement.

use crate::client::workspaces::WorkspaceResponse;
use crate::error::ProviderError;
use crate::values::Value;

/// The label list to push, from declared state. Null labels replace with an
/// empty list, clearing everything.
pub fn encode(state: &Value) -> Result<(String, Vec<String>), ProviderError> {
    let workspace_id = state
        .get("workspace_id")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("workspace_id is required".to_string()))?
        .to_string();
    let labels = state.get("labels").string_items().unwrap_or_default();
    Ok((workspace_id, labels))
}

/// Build new state from the workspace read.
pub fn decode(response: &WorkspaceResponse) -> Value {
    let labels = response
        .labels
        .as_ref()
        .map(|items| Value::string_list(items.iter().cloned()))
        .unwrap_or_else(|| Value::string_list(Vec::<String>::new()));
    Value::object([
        ("id", Value::string(&response.id)),
        ("workspace_id", Value::string(&response.id)),
        ("labels", labels),
    ])
}
