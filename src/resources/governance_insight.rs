//! The `firefly_governance_insight` resource.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::governance;
use crate::schema::{Attribute, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, state_id, Context, ReadOutcome, ResourceHandler};

/// Manages a Firefly governance insight.
#[derive(Debug, Default)]
pub struct GovernanceInsightResource;

impl GovernanceInsightResource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceHandler for GovernanceInsightResource {
    fn type_name(&self) -> &'static str {
        "firefly_governance_insight"
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
                    .with_description("Rego insight source, plain text."),
            )
            .with_attribute("providers", Attribute::optional_string_list())
            .with_attribute("category", Attribute::optional_string())
            .with_attribute("labels", Attribute::optional_string_list())
            .with_attribute(
                "severity",
                Attribute::required_string().with_validator(Validator::OneOf(vec![
                    "trace".to_string(),
                    "info".to_string(),
                    "low".to_string(),
                    "medium".to_string(),
                    "high".to_string(),
                    "critical".to_string(),
                ])),
            )
            .with_attribute(
                "is_default",
                Attribute::new(
                    crate::schema::AttributeType::Bool,
                    crate::schema::AttributeFlags::computed(),
                ),
            )
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        let request = governance::encode_insight(planned)?;
        let created = ctx.client.governance().create_insight(&request).await?;
        let fresh = match ctx.client.governance().get_insight(&created.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                })
            }
        };
        governance::decode_insight(&fresh, planned)
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.governance().get_insight(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(governance::decode_insight(
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
        let request = governance::encode_insight(planned)?;
        ctx.client.governance().update_insight(id, &request).await?;
        let fresh = ctx.client.governance().get_insight(id).await?;
        governance::decode_insight(&fresh, planned)
    }

    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        ignore_not_found(ctx.client.governance().delete_insight(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_enumerated() {
        let schema = GovernanceInsightResource::new().schema();
        let severity = schema.attribute("severity").unwrap();
        assert!(severity
            .validators
            .iter()
            .any(|v| matches!(v, Validator::OneOf(_))));
    }
}
