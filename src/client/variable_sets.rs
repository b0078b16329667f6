//! Variable sets API client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, Transport};
use crate::error::ProviderError;

/// A single variable inside a set.
///
/// `sensitivity = "secret"` values are write-only: the remote omits them on
/// read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableWire {
    /// Variable key.
    pub key: String,
    /// Variable value; absent on read for secrets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// "string" or "secret".
    pub sensitivity: String,
    /// "env" or "iac".
    pub destination: String,
}

/// A variable set as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSetResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Set name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Labels attached to the set.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    /// Parent set ids this set inherits from.
    #[serde(default)]
    pub parents: Option<Vec<String>>,
    /// The variables in this set.
    #[serde(default)]
    pub variables: Vec<VariableWire>,
}

/// Create/update payload for a variable set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableSetRequest {
    /// Set name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Labels attached to the set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Parent set ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,
    /// The variables in this set.
    pub variables: Vec<VariableWire>,
}

/// Client for `/variable-sets`.
#[derive(Debug, Clone)]
pub struct VariableSetsClient {
    transport: Arc<Transport>,
}

impl VariableSetsClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of variable sets.
    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<VariableSetResponse>, ProviderError> {
        self.transport
            .get_json("/variable-sets", &query.to_params())
            .await
    }

    /// List variable sets across pages, up to `cap` entries.
    pub async fn list_all(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<VariableSetResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list(&q).await }).await
    }

    /// Fetch a variable set by id.
    pub async fn get(&self, id: &str) -> Result<VariableSetResponse, ProviderError> {
        self.transport
            .get_json(&format!("/variable-sets/{}", id), &[])
            .await
    }

    /// Create a variable set.
    pub async fn create(
        &self,
        request: &VariableSetRequest,
    ) -> Result<VariableSetResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport.post_json("/variable-sets", &body).await
    }

    /// Update a variable set in place.
    pub async fn update(
        &self,
        id: &str,
        request: &VariableSetRequest,
    ) -> Result<VariableSetResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .patch_json(&format!("/variable-sets/{}", id), &body)
            .await
    }

    /// Delete a variable set.
    pub async fn delete(&self, id: &str) -> Result<(), ProviderError> {
        self.transport
            .delete(&format!("/variable-sets/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_value_absent_on_read() {
        let wire: VariableWire = serde_json::from_value(serde_json::json!({
            "key": "DB_PASSWORD",
            "sensitivity": "secret",
            "destination": "env",
        }))
        .unwrap();
        assert!(wire.value.is_none());
    }
}
