//! Projects API client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, Transport};
use crate::error::ProviderError;

/// A project as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description; the remote may echo an empty string.
    #[serde(default)]
    pub description: Option<String>,
    /// Labels attached to the project.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Number of members, filled on read.
    #[serde(default)]
    pub members_count: Option<i64>,
}

/// Create/update payload for a project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Labels attached to the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Client for `/projects`.
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    transport: Arc<Transport>,
}

impl ProjectsClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of projects.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<ProjectResponse>, ProviderError> {
        self.transport
            .get_json("/projects", &query.to_params())
            .await
    }

    /// List projects across pages, up to `cap` entries.
    pub async fn list_all(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<ProjectResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list(&q).await }).await
    }

    /// Fetch a project by id.
    pub async fn get(&self, id: &str) -> Result<ProjectResponse, ProviderError> {
        self.transport
            .get_json(&format!("/projects/{}", id), &[])
            .await
    }

    /// Create a project.
    pub async fn create(&self, request: &ProjectRequest) -> Result<ProjectResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport.post_json("/projects", &body).await
    }

    /// Update a project in place.
    pub async fn update(
        &self,
        id: &str,
        request: &ProjectRequest,
    ) -> Result<ProjectResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .patch_json(&format!("/projects/{}", id), &body)
            .await
    }

    /// Delete a project.
    pub async fn delete(&self, id: &str) -> Result<(), ProviderError> {
        self.transport.delete(&format!("/projects/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_absent_fields() {
        let request = ProjectRequest {
            name: "proj-a".to_string(),
            description: None,
            labels: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"name": "proj-a"}));
    }

    #[test]
    fn test_response_tolerates_missing_optionals() {
        let response: ProjectResponse =
            serde_json::from_value(serde_json::json!({"id": "p-1", "name": "proj-a"})).unwrap();
        assert_eq!(response.id, "p-1");
        assert!(response.description.is_none());
        assert!(response.labels.is_none());
    }
}
