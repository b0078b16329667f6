//! Guardrails API client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, PatternSetWire, Transport};
use crate::error::ProviderError;

/// Cost criteria for a cost guardrail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCriteriaWire {
    /// Absolute cost threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_amount: Option<f64>,
    /// Percentage increase threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_percentage: Option<f64>,
}

/// Resource criteria for a resource guardrail.
///
/// The remote requires non-empty `regions` and `asset_types`; the mapping
/// layer injects `{include: ["*"]}` when the user declared neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCriteriaWire {
    /// Actions that trigger the guardrail ("create", "update", "delete").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    /// Region scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<PatternSetWire>,
    /// Asset-type scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_types: Option<PatternSetWire>,
    /// Specific resource ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_resources: Option<Vec<String>>,
}

/// Tag-enforcement criteria for a tag guardrail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCriteriaWire {
    /// Tags that must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_tags: Option<Vec<String>>,
    /// Enforcement mode for tag values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_enforcement_mode: Option<String>,
}

/// Policy criteria for a policy guardrail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCriteriaWire {
    /// Governance policy ids to enforce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<String>>,
    /// Minimum policy severity that triggers the guardrail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,
}

/// The scope and type-specific criteria of a guardrail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailCriteriaWire {
    /// Workspace scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<PatternSetWire>,
    /// Repository scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<PatternSetWire>,
    /// Branch scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<PatternSetWire>,
    /// Label scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<PatternSetWire>,
    /// Cost criteria, for `type = "cost"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostCriteriaWire>,
    /// Resource criteria, for `type = "resource"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceCriteriaWire>,
    /// Tag criteria, for `type = "tag"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagCriteriaWire>,
    /// Policy criteria, for `type = "policy"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyCriteriaWire>,
}

/// A guardrail as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Guardrail name.
    pub name: String,
    /// Guardrail type: "cost", "policy", "resource", or "tag".
    #[serde(rename = "type")]
    pub guardrail_type: String,
    /// Severity on the wire: 1 = flexible, 2 = strict, 3 = warning.
    pub severity: i64,
    /// Whether the guardrail is enabled.
    #[serde(default)]
    pub is_enabled: Option<bool>,
    /// Notification target id.
    #[serde(default)]
    pub notification_id: Option<String>,
    /// Scope and type-specific criteria.
    #[serde(default)]
    pub criteria: GuardrailCriteriaWire,
}

/// Create/update payload for a guardrail.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailRequest {
    /// Guardrail name.
    pub name: String,
    /// Guardrail type.
    #[serde(rename = "type")]
    pub guardrail_type: String,
    /// Severity on the wire.
    pub severity: i64,
    /// Whether the guardrail is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    /// Notification target id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    /// Scope and type-specific criteria.
    pub criteria: GuardrailCriteriaWire,
}

/// Client for `/guardrails`.
#[derive(Debug, Clone)]
pub struct GuardrailsClient {
    transport: Arc<Transport>,
}

impl GuardrailsClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of guardrails.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<GuardrailResponse>, ProviderError> {
        self.transport
            .get_json("/guardrails", &query.to_params())
            .await
    }

    /// List guardrails across pages, up to `cap` entries.
    pub async fn list_all(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<GuardrailResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list(&q).await }).await
    }

    /// Fetch a guardrail by id.
    pub async fn get(&self, id: &str) -> Result<GuardrailResponse, ProviderError> {
        self.transport
            .get_json(&format!("/guardrails/{}", id), &[])
            .await
    }

    /// Create a guardrail.
    pub async fn create(
        &self,
        request: &GuardrailRequest,
    ) -> Result<GuardrailResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport.post_json("/guardrails", &body).await
    }

    /// Update a guardrail in place.
    pub async fn update(
        &self,
        id: &str,
        request: &GuardrailRequest,
    ) -> Result<GuardrailResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .patch_json(&format!("/guardrails/{}", id), &body)
            .await
    }

    /// Delete a guardrail. No read follows a guardrail delete.
    pub async fn delete(&self, id: &str) -> Result<(), ProviderError> {
        self.transport.delete(&format!("/guardrails/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria_serializes_empty_object() {
        let request = GuardrailRequest {
            name: "g".to_string(),
            guardrail_type: "cost".to_string(),
            severity: 2,
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["criteria"], serde_json::json!({}));
        assert_eq!(json["type"], "cost");
    }

    #[test]
    fn test_wildcard_pattern_set() {
        let wire = PatternSetWire::wildcard();
        assert!(wire.is_wildcard());
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            serde_json::json!({"include": ["*"]})
        );
    }
}
