//! The `firefly_project` resource.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::project;
use crate::schema::{Attribute, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, state_id, Context, ReadOutcome, ResourceHandler};

/// Manages a Firefly project.
#[derive(Debug, Default)]
pub struct ProjectResource;

impl ProjectResource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceHandler for ProjectResource {
    fn type_name(&self) -> &'static str {
        "firefly_project"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string().use_state_for_unknown(),
            )
            .with_attribute(
                "name",
                Attribute::required_string()
                    .with_validator(Validator::LengthAtLeast(1))
                    .with_description("Project name."),
            )
            .with_attribute("description", Attribute::optional_string())
            .with_attribute("labels", Attribute::optional_string_list())
            .with_attribute(
                "members_count",
                Attribute::new(
                    crate::schema::AttributeType::Int64,
                    crate::schema::AttributeFlags::computed(),
                ),
            )
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        let request = project::encode(planned)?;
        let created = ctx.client.projects().create(&request).await?;
        let fresh = match ctx.client.projects().get(&created.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                })
            }
        };
        Ok(project::decode(&fresh, planned))
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.projects().get(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(project::decode(&fresh, state))),
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
        let request = project::encode(planned)?;
        ctx.client.projects().update(id, &request).await?;
        let fresh = ctx.client.projects().get(id).await?;
        Ok(project::decode(&fresh, planned))
    }

    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        ignore_not_found(ctx.client.projects().delete(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_shape() {
        let resource = ProjectResource::new();
        let schema = resource.schema();
        assert!(schema.attribute("name").is_some());
        assert!(schema.attribute("id").unwrap().keeps_state_for_unknown());
        assert_eq!(resource.type_name(), "firefly_project");
    }
}
