//! The `firefly_guardrail` resource.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::guardrail;
use crate::schema::{Attribute, Block, NestedBlock, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, state_id, Context, ReadOutcome, ResourceHandler};

/// Manages a Firefly guardrail.
#[derive(Debug, Default)]
pub struct GuardrailResource;

impl GuardrailResource {
    pub fn new() -> Self {
        Self
    }
}

fn pattern_set_block() -> Block {
    Block::new()
        .with_attribute("include", Attribute::optional_string_list())
        .with_attribute("exclude", Attribute::optional_string_list())
}

#[async_trait]
impl ResourceHandler for GuardrailResource {
    fn type_name(&self) -> &'static str {
        "firefly_guardrail"
    }

    fn schema(&self) -> Schema {
        let cost = Block::new()
            .with_attribute(
                "threshold_amount",
                Attribute::new(
                    crate::schema::AttributeType::Float64,
                    crate::schema::AttributeFlags::optional(),
                ),
            )
            .with_attribute(
                "threshold_percentage",
                Attribute::new(
                    crate::schema::AttributeType::Float64,
                    crate::schema::AttributeFlags::optional(),
                ),
            );

        let resource = Block::new()
            .with_attribute("actions", Attribute::optional_string_list())
            .with_attribute("specific_resources", Attribute::optional_string_list())
            .with_block("regions", NestedBlock::single(pattern_set_block()))
            .with_block("asset_types", NestedBlock::single(pattern_set_block()));

        let tag = Block::new()
            .with_attribute("required_tags", Attribute::optional_string_list())
            .with_attribute("tag_enforcement_mode", Attribute::optional_string());

        let policy = Block::new()
            .with_attribute("policies", Attribute::optional_string_list())
            .with_attribute(
                "severity",
                Attribute::optional_string().with_validator(Validator::OneOf(vec![
                    "trace".to_string(),
                    "info".to_string(),
                    "low".to_string(),
                    "medium".to_string(),
                    "high".to_string(),
                    "critical".to_string(),
                ])),
            );

        let criteria = Block::new()
            .with_block("workspaces", NestedBlock::single(pattern_set_block()))
            .with_block("repositories", NestedBlock::single(pattern_set_block()))
            .with_block("branches", NestedBlock::single(pattern_set_block()))
            .with_block("labels", NestedBlock::single(pattern_set_block()))
            .with_block("cost", NestedBlock::single(cost))
            .with_block("resource", NestedBlock::single(resource))
            .with_block("tag", NestedBlock::single(tag))
            .with_block("policy", NestedBlock::single(policy));

        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string().use_state_for_unknown(),
            )
            .with_attribute(
                "name",
                Attribute::required_string().with_validator(Validator::LengthAtLeast(1)),
            )
            .with_attribute(
                "type",
                Attribute::required_string()
                    .requires_replace()
                    .with_validator(Validator::OneOf(vec![
                        "cost".to_string(),
                        "policy".to_string(),
                        "resource".to_string(),
                        "tag".to_string(),
                    ])),
            )
            .with_attribute(
                "severity",
                Attribute::required_string().with_validator(Validator::OneOf(vec![
                    "flexible".to_string(),
                    "strict".to_string(),
                    "warning".to_string(),
                ])),
            )
            .with_attribute(
                "is_enabled",
                Attribute::optional_bool().with_default(Value::Bool(true)),
            )
            .with_attribute("notification_id", Attribute::optional_string())
            .with_block("criteria", NestedBlock::single(criteria).with_min_items(1))
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        let request = guardrail::encode(planned)?;
        let created = ctx.client.guardrails().create(&request).await?;
        let fresh = match ctx.client.guardrails().get(&created.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                })
            }
        };
        Ok(guardrail::decode(&fresh, planned))
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.guardrails().get(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(guardrail::decode(&fresh, state))),
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
        let request = guardrail::encode(planned)?;
        ctx.client.guardrails().update(id, &request).await?;
        let fresh = ctx.client.guardrails().get(id).await?;
        Ok(guardrail::decode(&fresh, planned))
    }

    // Guardrail deletes are terminal on the remote; no read may follow.
    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        ignore_not_found(ctx.client.guardrails().delete(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_forces_replacement() {
        let schema = GuardrailResource::new().schema();
        assert!(schema.attribute("type").unwrap().forces_replacement());
        assert!(!schema.attribute("name").unwrap().forces_replacement());
    }

    #[test]
    fn test_criteria_block_required() {
        let schema = GuardrailResource::new().schema();
        let criteria = schema.block.blocks.get("criteria").unwrap();
        assert_eq!(criteria.min_items, 1);
    }
}
