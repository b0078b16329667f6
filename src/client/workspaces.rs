//! Workspaces API client, including label replacement.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, Transport};
use crate::error::ProviderError;

/// A workspace as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Workspace name.
    pub name: String,
    /// Source repository, when the workspace is VCS-backed.
    #[serde(default)]
    pub repository: Option<String>,
    /// Labels attached to the workspace.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Status of the most recent run, filled on read.
    #[serde(default)]
    pub last_run_status: Option<String>,
}

/// Payload for replacing a workspace's labels wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsRequest {
    /// The full replacement label list.
    pub labels: Vec<String>,
}

/// Client for `/workspaces`.
#[derive(Debug, Clone)]
pub struct WorkspacesClient {
    transport: Arc<Transport>,
}

impl WorkspacesClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of workspaces.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<WorkspaceResponse>, ProviderError> {
        self.transport
            .get_json("/workspaces", &query.to_params())
            .await
    }

    /// List workspaces across pages, up to `cap` entries.
    pub async fn list_all(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<WorkspaceResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list(&q).await }).await
    }

    /// Fetch a workspace by id.
    pub async fn get(&self, id: &str) -> Result<WorkspaceResponse, ProviderError> {
        self.transport
            .get_json(&format!("/workspaces/{}", id), &[])
            .await
    }

    /// Replace the workspace's labels. Full replacement semantics: an empty
    /// list clears all labels.
    pub async fn replace_labels(&self, id: &str, labels: Vec<String>) -> Result<(), ProviderError> {
        let body = serde_json::to_value(LabelsRequest { labels })?;
        self.transport
            .put_empty(&format!("/workspaces/{}/labels", id), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_request_serializes_empty_list() {
        let json = serde_json::to_value(LabelsRequest { labels: vec![] }).unwrap();
        assert_eq!(json, serde_json::json!({"labels": []}));
    }
}
