//! Governance insights and policies API client.
//!
//! Both entity kinds store Rego source base64-encoded in their `code` field;
//! encoding and decoding happen in the mapping layer, the client carries the
//! wire form untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, Transport};
use crate::error::ProviderError;

/// A governance insight as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Insight name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Rego source, base64 on the wire.
    pub code: String,
    /// Cloud providers this insight applies to.
    #[serde(default)]
    pub providers: Option<Vec<String>>,
    /// Insight category.
    #[serde(default)]
    pub category: Option<String>,
    /// Labels attached to the insight.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Severity on the wire: 1 = trace .. 6 = critical.
    pub severity: i64,
    /// Whether this is a Firefly-builtin insight.
    #[serde(default)]
    pub is_default: Option<bool>,
}

/// Create/update payload for a governance insight.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    /// Insight name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rego source, base64 on the wire.
    pub code: String,
    /// Cloud providers this insight applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<String>>,
    /// Insight category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Labels attached to the insight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Severity on the wire.
    pub severity: i64,
}

/// A governance policy as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Policy name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Rego source, base64 on the wire.
    pub code: String,
    /// Cloud providers this policy applies to.
    #[serde(default)]
    pub providers: Option<Vec<String>>,
    /// Compliance frameworks this policy belongs to.
    #[serde(default)]
    pub frameworks: Option<Vec<String>>,
    /// Labels attached to the policy.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Severity on the wire: 1 = trace .. 6 = critical.
    pub severity: i64,
    /// Whether the policy is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Create/update payload for a governance policy.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    /// Policy name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rego source, base64 on the wire.
    pub code: String,
    /// Cloud providers this policy applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<String>>,
    /// Compliance frameworks this policy belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<Vec<String>>,
    /// Labels attached to the policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Severity on the wire.
    pub severity: i64,
    /// Whether the policy is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Client for `/governance/insights` and `/governance/policies`.
#[derive(Debug, Clone)]
pub struct GovernanceClient {
    transport: Arc<Transport>,
}

impl GovernanceClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of insights.
    pub async fn list_insights(
        &self,
        query: &ListQuery,
    ) -> Result<Page<InsightResponse>, ProviderError> {
        self.transport
            .get_json("/governance/insights", &query.to_params())
            .await
    }

    /// List insights across pages, up to `cap` entries.
    pub async fn list_all_insights(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<InsightResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list_insights(&q).await }).await
    }

    /// Fetch an insight by id.
    pub async fn get_insight(&self, id: &str) -> Result<InsightResponse, ProviderError> {
        self.transport
            .get_json(&format!("/governance/insights/{}", id), &[])
            .await
    }

    /// Create an insight.
    pub async fn create_insight(
        &self,
        request: &InsightRequest,
    ) -> Result<InsightResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport.post_json("/governance/insights", &body).await
    }

    /// Update an insight in place.
    pub async fn update_insight(
        &self,
        id: &str,
        request: &InsightRequest,
    ) -> Result<InsightResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .patch_json(&format!("/governance/insights/{}", id), &body)
            .await
    }

    /// Delete an insight.
    pub async fn delete_insight(&self, id: &str) -> Result<(), ProviderError> {
        self.transport
            .delete(&format!("/governance/insights/{}", id))
            .await
    }

    /// List one page of policies.
    pub async fn list_policies(
        &self,
        query: &ListQuery,
    ) -> Result<Page<PolicyResponse>, ProviderError> {
        self.transport
            .get_json("/governance/policies", &query.to_params())
            .await
    }

    /// List policies across pages, up to `cap` entries.
    pub async fn list_all_policies(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<PolicyResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list_policies(&q).await }).await
    }

    /// Fetch a policy by id.
    pub async fn get_policy(&self, id: &str) -> Result<PolicyResponse, ProviderError> {
        self.transport
            .get_json(&format!("/governance/policies/{}", id), &[])
            .await
    }

    /// Create a policy.
    pub async fn create_policy(
        &self,
        request: &PolicyRequest,
    ) -> Result<PolicyResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport.post_json("/governance/policies", &body).await
    }

    /// Update a policy in place.
    pub async fn update_policy(
        &self,
        id: &str,
        request: &PolicyRequest,
    ) -> Result<PolicyResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .patch_json(&format!("/governance/policies/{}", id), &body)
            .await
    }

    /// Delete a policy.
    pub async fn delete_policy(&self, id: &str) -> Result<(), ProviderError> {
        self.transport
            .delete(&format!("/governance/policies/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_request_wire_shape() {
        let request = InsightRequest {
            name: "untagged-buckets".to_string(),
            code: "ZmlyZWZseSB7IHRydWUgfQ==".to_string(),
            severity: 4,
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["severity"], 4);
        assert_eq!(json["code"], "ZmlyZWZseSB7IHRydWUgfQ==");
        assert!(json.get("providers").is_none());
    }
}
