//! The `firefly_runners_workspace` resource.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::runners;
use crate::schema::{Attribute, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, state_id, Context, ReadOutcome, ResourceHandler};

/// Manages a Firefly runners workspace.
#[derive(Debug, Default)]
pub struct RunnersWorkspaceResource;

impl RunnersWorkspaceResource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceHandler for RunnersWorkspaceResource {
    fn type_name(&self) -> &'static str {
        "firefly_runners_workspace"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string().use_state_for_unknown(),
            )
            .with_attribute(
                "name",
                Attribute::required_string().with_validator(Validator::LengthAtLeast(1)),
            )
            .with_attribute("description", Attribute::optional_string())
            .with_attribute(
                "repository",
                Attribute::optional_string().requires_replace(),
            )
            .with_attribute(
                "vcs_integration_id",
                Attribute::optional_string().requires_replace(),
            )
            .with_attribute("branch", Attribute::optional_string())
            .with_attribute("working_directory", Attribute::optional_string())
            .with_attribute("iac_type", Attribute::optional_string())
            .with_attribute("iac_version", Attribute::optional_string())
            .with_attribute("labels", Attribute::optional_string_list())
            .with_attribute("variable_set_ids", Attribute::optional_string_list())
            .with_attribute("apply_rule", Attribute::optional_string())
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        let request = runners::encode(planned)?;
        let created = ctx.client.runners().create(&request).await?;
        let fresh = match ctx.client.runners().get(&created.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                })
            }
        };
        Ok(runners::decode(&fresh, planned))
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.runners().get(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(runners::decode(&fresh, state))),
            None => Ok(ReadOutcome::Gone),
        }
    }

    async fn update(
        &self,
        ctx: &Context,
        state: &Value,
        planned: &Value,
    ) -> Result<Value, ProviderError> {
        let id = state_id(state)?;
        let request = runners::encode(planned)?;
        ctx.client.runners().update(id, &request).await?;
        let fresh = ctx.client.runners().get(id).await?;
        Ok(runners::decode(&fresh, planned))
    }

    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        ignore_not_found(ctx.client.runners().delete(id).await)
    }
}
