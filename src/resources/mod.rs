//! Resource handlers: one reconciler per managed entity kind.
//!
//! A handler owns the kind's schema and its CRUD + import reconciliation
//! against the remote. All remote calls inside one handler invocation are
//! strictly sequenced; a second mutation is never issued before the prior
//! one's response is observed.

pub mod backup_policy;
pub mod governance_insight;
pub mod governance_policy;
pub mod guardrail;
pub mod project;
pub mod project_membership;
pub mod runners_workspace;
pub mod variable_set;
pub mod workspace_labels;

use async_trait::async_trait;

use crate::client::FireflyClient;
use crate::error::ProviderError;
use crate::schema::Schema;
use crate::values::Value;

/// Shared dependencies handed to every handler call.
#[derive(Debug, Clone)]
pub struct Context {
    /// The configured API client.
    pub client: FireflyClient,
}

impl Context {
    /// Wrap a configured client.
    pub fn new(client: FireflyClient) -> Self {
        Self { client }
    }
}

/// What a refresh found.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// The entity exists; here is its current state.
    Refreshed(Value),
    /// The entity no longer exists remotely; the host should drop it from
    /// state and plan recreation.
    Gone,
}

/// The reconciler for one entity kind.
#[async_trait]
pub trait ResourceHandler: Send + Sync + 'static {
    /// The fully-qualified type name, e.g. `firefly_project`.
    fn type_name(&self) -> &'static str;

    /// The kind's schema.
    fn schema(&self) -> Schema;

    /// Kind-specific cross-attribute validation, run after schema
    /// validation. The default has nothing to add.
    fn validate_config(&self, config: &Value) -> Vec<crate::schema::Diagnostic> {
        let _ = config;
        Vec::new()
    }

    /// Create the entity from the planned state and return the new state.
    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError>;

    /// Refresh current state. A missing entity is [`ReadOutcome::Gone`],
    /// not an error.
    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError>;

    /// Update the entity to the planned state and return the new state.
    /// Unlike read, a missing entity is an error here.
    async fn update(
        &self,
        ctx: &Context,
        state: &Value,
        planned: &Value,
    ) -> Result<Value, ProviderError>;

    /// Delete the entity. Already-gone entities are success.
    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError>;

    /// Seed state from an import id; the host follows up with a read.
    async fn import(&self, _ctx: &Context, id: &str) -> Result<Value, ProviderError> {
        let id = parse_import_id(id)?;
        Ok(Value::object([("id", Value::string(id))]))
    }
}

/// Trim and validate a simple (non-composite) import id.
pub(crate) fn parse_import_id(raw: &str) -> Result<String, ProviderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::InvalidImportId(
            "import id must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Map a NotFound from a refresh into [`ReadOutcome::Gone`].
pub(crate) fn gone_on_not_found<T>(
    result: Result<T, ProviderError>,
) -> Result<Option<T>, ProviderError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Treat NotFound as success for deletes.
pub(crate) fn ignore_not_found(result: Result<(), ProviderError>) -> Result<(), ProviderError> {
    match result {
        Err(e) if e.is_not_found() => Ok(()),
        other => other,
    }
}

/// The state id, which every persisted state must carry.
pub(crate) fn state_id(state: &Value) -> Result<&str, ProviderError> {
    state
        .get("id")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("state is missing its id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_id_trims() {
        assert_eq!(parse_import_id("  p-1 ").unwrap(), "p-1");
    }

    #[test]
    fn test_parse_import_id_rejects_empty() {
        assert!(matches!(
            parse_import_id("   "),
            Err(ProviderError::InvalidImportId(_))
        ));
    }

    #[test]
    fn test_ignore_not_found() {
        assert!(ignore_not_found(Err(ProviderError::NotFound("x".to_string()))).is_ok());
        assert!(ignore_not_found(Err(ProviderError::Conflict("x".to_string()))).is_err());
    }
}
