//! The `firefly_governance_policy` resource.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::governance;
use crate::schema::{Attribute, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, state_id, Context, ReadOutcome, ResourceHandler};

fn severity_validator() -> Validator {
    Validator::OneOf(vec![
        "trace".to_string(),
        "info".to_string(),
        "low".to_string(),
        "medium".to_string(),
        "high".to_string(),
        "critical".to_string(),
    ])
}

/// Manages a Firefly governance policy.
#[derive(Debug, Default)]
pub struct GovernancePolicyResource;

impl GovernancePolicyResource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceHandler for GovernancePolicyResource {
    fn type_name(&self) -> &'static str {
        "firefly_governance_policy"
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
                "code",
                Attribute::required_string()
                    .with_validator(Validator::LengthAtLeast(1))
                    .with_description("Rego policy source, plain text."),
            )
            .with_attribute("providers", Attribute::optional_string_list())
            .with_attribute("frameworks", Attribute::optional_string_list())
            .with_attribute("labels", Attribute::optional_string_list())
            .with_attribute(
                "severity",
                Attribute::required_string().with_validator(severity_validator()),
            )
            .with_attribute(
                "enabled",
                Attribute::optional_bool().with_default(Value::Bool(true)),
            )
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        let request = governance::encode_policy(planned)?;
        let created = ctx.client.governance().create_policy(&request).await?;
        let fresh = match ctx.client.governance().get_policy(&created.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                })
            }
        };
        governance::decode_policy(&fresh, planned)
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.governance().get_policy(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(governance::decode_policy(
                &fresh, state,
            )?)),
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
        let request = governance::encode_policy(planned)?;
        ctx.client.governance().update_policy(id, &request).await?;
        let fresh = ctx.client.governance().get_policy(id).await?;
        governance::decode_policy(&fresh, planned)
    }

    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        ignore_not_found(ctx.client.governance().delete_policy(id).await)
    }
}
