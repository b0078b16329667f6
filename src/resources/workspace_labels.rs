//! The `firefly_workspace_labels` resource.
//!
//! Manages the full label list of an existing workspace. There is no
//! separate remote entity: create and update both replace the list, and
//! delete replaces it with the empty list.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::labels;
use crate::schema::{Attribute, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, state_id, Context, ReadOutcome, ResourceHandler};

/// Manages a workspace's labels wholesale.
#[derive(Debug, Default)]
pub struct WorkspaceLabelsResource;

impl WorkspaceLabelsResource {
    pub fn new() -> Self {
        Self
    }
}

impl WorkspaceLabelsResource {
    async fn replace_and_refresh(
        &self,
        ctx: &Context,
        planned: &Value,
    ) -> Result<Value, ProviderError> {
        let (workspace_id, label_list) = labels::encode(planned)?;
        ctx.client
            .workspaces()
            .replace_labels(&workspace_id, label_list)
            .await?;
        let fresh = ctx.client.workspaces().get(&workspace_id).await?;
        Ok(labels::decode(&fresh))
    }
}

#[async_trait]
impl ResourceHandler for WorkspaceLabelsResource {
    fn type_name(&self) -> &'static str {
        "firefly_workspace_labels"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string().use_state_for_unknown(),
            )
            .with_attribute(
                "workspace_id",
                Attribute::required_string()
                    .requires_replace()
                    .with_validator(Validator::LengthAtLeast(1)),
            )
            .with_attribute("labels", Attribute::optional_string_list())
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        self.replace_and_refresh(ctx, planned).await
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.workspaces().get(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(labels::decode(&fresh))),
            None => Ok(ReadOutcome::Gone),
        }
    }

    async fn update(
        &self,
        ctx: &Context,
        _state: &Value,
        planned: &Value,
    ) -> Result<Value, ProviderError> {
        self.replace_and_refresh(ctx, planned).await
    }

    /// Deleting the managed entity clears the workspace's labels; the
    /// workspace itself is untouched. A vanished workspace is success.
    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        match ctx.client.workspaces().replace_labels(id, Vec::new()).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => other,
        }
    }

    async fn import(&self, _ctx: &Context, id: &str) -> Result<Value, ProviderError> {
        let workspace_id = super::parse_import_id(id)?;
        Ok(Value::object([
            ("id", Value::string(&workspace_id)),
            ("workspace_id", Value::string(workspace_id)),
        ]))
    }
}
