//! The `firefly_variable_set` resource.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::variable_set;
use crate::schema::{Attribute, Block, NestedBlock, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, state_id, Context, ReadOutcome, ResourceHandler};

/// Manages a Firefly variable set.
#[derive(Debug, Default)]
pub struct VariableSetResource;

impl VariableSetResource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceHandler for VariableSetResource {
    fn type_name(&self) -> &'static str {
        "firefly_variable_set"
    }

    fn schema(&self) -> Schema {
        let variable = Block::new()
            .with_attribute(
                "key",
                Attribute::required_string().with_validator(Validator::LengthAtLeast(1)),
            )
            .with_attribute("value", Attribute::optional_string().sensitive())
            .with_attribute(
                "sensitivity",
                Attribute::optional_string().with_validator(Validator::OneOf(vec![
                    "string".to_string(),
                    "secret".to_string(),
                ])),
            )
            .with_attribute(
                "destination",
                Attribute::optional_string().with_validator(Validator::OneOf(vec![
                    "env".to_string(),
                    "iac".to_string(),
                ])),
            );

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
            .with_attribute("labels", Attribute::optional_string_list())
            .with_attribute("parents", Attribute::optional_string_list())
            .with_block("variables", NestedBlock::list(variable))
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        let request = variable_set::encode(planned)?;
        let created = ctx.client.variable_sets().create(&request).await?;
        let fresh = match ctx.client.variable_sets().get(&created.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                })
            }
        };
        Ok(variable_set::decode(&fresh, planned))
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.variable_sets().get(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(variable_set::decode(&fresh, state))),
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
        let request = variable_set::encode(planned)?;
        ctx.client.variable_sets().update(id, &request).await?;
        let fresh = ctx.client.variable_sets().get(id).await?;
        Ok(variable_set::decode(&fresh, planned))
    }

    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        ignore_not_found(ctx.client.variable_sets().delete(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_attribute_is_sensitive() {
        let schema = VariableSetResource::new().schema();
        let variables = schema.block.blocks.get("variables").unwrap();
        assert!(variables.block.attributes.get("value").unwrap().flags.sensitive);
    }
}
