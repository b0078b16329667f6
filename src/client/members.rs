//! Project members API client.
//!
//! Membership has no remote id of its own; it is addressed by the
//! (project id, user id) pair.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, Transport};
use crate::error::ProviderError;

/// A project member as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    /// User id of the member.
    pub user_id: String,
    /// Member email, filled on read.
    #[serde(default)]
    pub email: Option<String>,
    /// Member role within the project.
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload for adding or replacing a member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    /// User id to add.
    pub user_id: String,
    /// Role to grant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Client for `/projects/{id}/members`.
#[derive(Debug, Clone)]
pub struct MembersClient {
    transport: Arc<Transport>,
}

impl MembersClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of a project's members.
    pub async fn list(
        &self,
        project_id: &str,
        query: &ListQuery,
    ) -> Result<Page<MemberResponse>, ProviderError> {
        self.transport
            .get_json(
                &format!("/projects/{}/members", project_id),
                &query.to_params(),
            )
            .await
    }

    /// List a project's members across pages, up to `cap` entries.
    pub async fn list_all(
        &self,
        project_id: &str,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<MemberResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list(project_id, &q).await }).await
    }

    /// Fetch a member by user id.
    pub async fn get(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<MemberResponse, ProviderError> {
        self.transport
            .get_json(&format!("/projects/{}/members/{}", project_id, user_id), &[])
            .await
    }

    /// Add a member to the project.
    pub async fn add(
        &self,
        project_id: &str,
        request: &MemberRequest,
    ) -> Result<MemberResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .post_json(&format!("/projects/{}/members", project_id), &body)
            .await
    }

    /// Replace a member's role.
    pub async fn replace(
        &self,
        project_id: &str,
        user_id: &str,
        request: &MemberRequest,
    ) -> Result<MemberResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .put_json(
                &format!("/projects/{}/members/{}", project_id, user_id),
                &body,
            )
            .await
    }

    /// Remove a member from the project.
    pub async fn remove(&self, project_id: &str, user_id: &str) -> Result<(), ProviderError> {
        self.transport
            .delete(&format!("/projects/{}/members/{}", project_id, user_id))
            .await
    }
}
