//! Runners workspaces API client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, Transport};
use crate::error::ProviderError;

/// A runners workspace as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnersWorkspaceResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Workspace name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Source repository.
    #[serde(default)]
    pub repository: Option<String>,
    /// VCS integration id.
    #[serde(default)]
    pub vcs_integration_id: Option<String>,
    /// Branch to run from.
    #[serde(default)]
    pub branch: Option<String>,
    /// Working directory inside the repository.
    #[serde(default)]
    pub working_directory: Option<String>,
    /// IaC framework ("terraform", "opentofu", ...).
    #[serde(default)]
    pub iac_type: Option<String>,
    /// Framework version constraint.
    #[serde(default)]
    pub iac_version: Option<String>,
    /// Labels attached to the workspace.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Variable set ids consumed by runs.
    #[serde(default)]
    pub variable_set_ids: Option<Vec<String>>,
    /// Whether applies require manual approval.
    #[serde(default)]
    pub apply_rule: Option<String>,
}

/// Create/update payload for a runners workspace.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnersWorkspaceRequest {
    /// Workspace name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// VCS integration id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_integration_id: Option<String>,
    /// Branch to run from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Working directory inside the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    /// IaC framework.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iac_type: Option<String>,
    /// Framework version constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iac_version: Option<String>,
    /// Labels attached to the workspace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Variable set ids consumed by runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_set_ids: Option<Vec<String>>,
    /// Whether applies require manual approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_rule: Option<String>,
}

/// Client for `/runners/workspaces`.
#[derive(Debug, Clone)]
pub struct RunnersClient {
    transport: Arc<Transport>,
}

impl RunnersClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of runners workspaces.
    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<RunnersWorkspaceResponse>, ProviderError> {
        self.transport
            .get_json("/runners/workspaces", &query.to_params())
            .await
    }

    /// List runners workspaces across pages, up to `cap` entries.
    pub async fn list_all(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<RunnersWorkspaceResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list(&q).await }).await
    }

    /// Fetch a runners workspace by id.
    pub async fn get(&self, id: &str) -> Result<RunnersWorkspaceResponse, ProviderError> {
        self.transport
            .get_json(&format!("/runners/workspaces/{}", id), &[])
            .await
    }

    /// Create a runners workspace.
    pub async fn create(
        &self,
        request: &RunnersWorkspaceRequest,
    ) -> Result<RunnersWorkspaceResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport.post_json("/runners/workspaces", &body).await
    }

    /// Update a runners workspace in place.
    pub async fn update(
        &self,
        id: &str,
        request: &RunnersWorkspaceRequest,
    ) -> Result<RunnersWorkspaceResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .patch_json(&format!("/runners/workspaces/{}", id), &body)
            .await
    }

    /// Delete a runners workspace.
    pub async fn delete(&self, id: &str) -> Result<(), ProviderError> {
        self.transport
            .delete(&format!("/runners/workspaces/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_minimal_wire_shape() {
        let request = RunnersWorkspaceRequest {
            name: "rw".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"name": "rw"}));
    }
}
