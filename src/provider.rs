//! The provider service: the host-facing contract and its Firefly
//! implementation.
//!
//! The host configures the provider once, then drives plan/apply/read/
//! delete/import per resource. Apply dispatches on state presence: no prior
//! and a planned state is a create, both present is an update, prior with
//! no planned state is a delete.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{provider_schema, ProviderConfig};
use crate::error::ProviderError;
use crate::plan::{plan_resource, PlanResult};
use crate::registry::Registry;
use crate::resources::{Context, ReadOutcome};
use crate::schema::{Diagnostic, ProviderSchema};
use crate::validation::validate;
use crate::values::Value;

/// The host-facing provider contract.
#[async_trait]
pub trait ProviderService: Send + Sync + 'static {
    /// The provider's full schema, including all resources and data sources.
    fn schema(&self) -> ProviderSchema;

    /// Validate the provider configuration before configuring.
    async fn validate_provider_config(
        &self,
        config: &Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = config;
        Ok(Vec::new())
    }

    /// Configure the provider with credentials and settings.
    async fn configure(&self, config: &Value) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Stop the provider gracefully.
    async fn stop(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Validate a resource's configuration before planning.
    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: &Value,
    ) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Plan changes for a resource.
    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<&Value>,
        proposed_state: &Value,
    ) -> Result<PlanResult, ProviderError>;

    /// Create a new resource from its planned state.
    async fn create(&self, resource_type: &str, planned: &Value) -> Result<Value, ProviderError>;

    /// Refresh a resource. `None` means the remote entity is gone and the
    /// host should drop it from state.
    async fn read(
        &self,
        resource_type: &str,
        current_state: &Value,
    ) -> Result<Option<Value>, ProviderError>;

    /// Update an existing resource to its planned state.
    async fn update(
        &self,
        resource_type: &str,
        prior_state: &Value,
        planned: &Value,
    ) -> Result<Value, ProviderError>;

    /// Delete a resource. Already-gone entities are success.
    async fn delete(&self, resource_type: &str, current_state: &Value)
        -> Result<(), ProviderError>;

    /// Seed state from an import id; the host follows up with a read.
    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Value, ProviderError>;

    /// Read a data source.
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: &Value,
    ) -> Result<Value, ProviderError>;

    /// Dispatch one apply step on state presence.
    async fn apply(
        &self,
        resource_type: &str,
        prior_state: Option<&Value>,
        planned: Option<&Value>,
    ) -> Result<Option<Value>, ProviderError> {
        match (prior_state, planned) {
            (None, Some(planned)) => Ok(Some(self.create(resource_type, planned).await?)),
            (Some(prior), Some(planned)) => {
                Ok(Some(self.update(resource_type, prior, planned).await?))
            }
            (Some(prior), None) => {
                self.delete(resource_type, prior).await?;
                Ok(None)
            }
            (None, None) => Ok(None),
        }
    }
}

/// The Firefly provider.
pub struct FireflyProvider {
    registry: Registry,
    context: RwLock<Option<Context>>,
}

impl FireflyProvider {
    /// A provider with the standard resource catalog, not yet configured.
    pub fn new() -> Self {
        Self {
            registry: Registry::standard(),
            context: RwLock::new(None),
        }
    }

    /// The registry backing this provider.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    async fn context(&self) -> Result<Context, ProviderError> {
        self.context
            .read()
            .await
            .clone()
            .ok_or_else(|| ProviderError::InvalidConfig("provider is not configured".to_string()))
    }
}

impl Default for FireflyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderService for FireflyProvider {
    fn schema(&self) -> ProviderSchema {
        self.registry.provider_schema(provider_schema())
    }

    async fn validate_provider_config(
        &self,
        config: &Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&provider_schema(), config))
    }

    async fn configure(&self, config: &Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let resolved = match ProviderConfig::resolve(config) {
            Ok(resolved) => resolved,
            Err(e) => return Ok(vec![e.into_diagnostic("Invalid provider configuration")]),
        };
        let client = resolved.client()?;
        info!(api_url = %resolved.api_url, "provider configured");
        *self.context.write().await = Some(Context::new(client));
        Ok(Vec::new())
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: &Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let handler = self.registry.resource(resource_type)?;
        let mut diagnostics = validate(&handler.schema(), config);
        diagnostics.extend(handler.validate_config(config));
        Ok(diagnostics)
    }

    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<&Value>,
        proposed_state: &Value,
    ) -> Result<PlanResult, ProviderError> {
        let handler = self.registry.resource(resource_type)?;
        let result = plan_resource(&handler.schema(), prior_state, proposed_state);
        debug!(
            resource_type,
            changes = result.changes.len(),
            requires_replace = result.requires_replace,
            "planned resource"
        );
        Ok(result)
    }

    async fn create(&self, resource_type: &str, planned: &Value) -> Result<Value, ProviderError> {
        let ctx = self.context().await?;
        let handler = self.registry.resource(resource_type)?;
        info!(resource_type, "creating resource");
        handler.create(&ctx, planned).await
    }

    async fn read(
        &self,
        resource_type: &str,
        current_state: &Value,
    ) -> Result<Option<Value>, ProviderError> {
        let ctx = self.context().await?;
        let handler = self.registry.resource(resource_type)?;
        match handler.read(&ctx, current_state).await? {
            ReadOutcome::Refreshed(state) => Ok(Some(state)),
            ReadOutcome::Gone => {
                info!(resource_type, "remote entity is gone, dropping from state");
                Ok(None)
            }
        }
    }

    async fn update(
        &self,
        resource_type: &str,
        prior_state: &Value,
        planned: &Value,
    ) -> Result<Value, ProviderError> {
        let ctx = self.context().await?;
        let handler = self.registry.resource(resource_type)?;
        info!(resource_type, "updating resource");
        handler.update(&ctx, prior_state, planned).await
    }

    async fn delete(
        &self,
        resource_type: &str,
        current_state: &Value,
    ) -> Result<(), ProviderError> {
        let ctx = self.context().await?;
        let handler = self.registry.resource(resource_type)?;
        info!(resource_type, "deleting resource");
        handler.delete(&ctx, current_state).await
    }

    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Value, ProviderError> {
        let ctx = self.context().await?;
        let handler = self.registry.resource(resource_type)?;
        handler.import(&ctx, id).await
    }

    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: &Value,
    ) -> Result<Value, ProviderError> {
        let ctx = self.context().await?;
        let handler = self.registry.data_source(data_source_type)?;
        handler.read(&ctx, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_provider_rejects_operations() {
        let provider = FireflyProvider::new();
        let state = Value::object([("id", Value::string("p-1"))]);
        assert!(matches!(
            provider.read("firefly_project", &state).await,
            Err(ProviderError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_resource_type() {
        let provider = FireflyProvider::new();
        assert!(matches!(
            provider
                .plan("firefly_widget", None, &Value::Null)
                .await,
            Err(ProviderError::UnknownResource(_))
        ));
    }

    #[tokio::test]
    async fn test_schema_covers_catalog() {
        let provider = FireflyProvider::new();
        let schema = provider.schema();
        assert!(schema.resources.contains_key("firefly_backup_policy"));
        assert!(schema.resources.contains_key("firefly_workflows_project"));
        assert!(schema.data_sources.contains_key("firefly_workspaces"));
        assert!(schema.provider.block.attributes.contains_key("access_key"));
    }

    #[tokio::test]
    async fn test_weekly_schedule_missing_days_flagged() {
        let provider = FireflyProvider::new();
        let config = Value::object([
            ("policy_name", Value::string("bp")),
            (
                "schedule",
                Value::object([
                    ("frequency", Value::string("weekly")),
                    ("hour", Value::Int(2)),
                    ("minute", Value::Int(0)),
                ]),
            ),
        ]);
        let diagnostics = provider
            .validate_resource_config("firefly_backup_policy", &config)
            .await
            .unwrap();
        assert!(diagnostics
            .iter()
            .any(|d| d.detail.as_deref().unwrap_or_default().contains("days_of_week")));
    }
}
