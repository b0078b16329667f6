//! The `firefly_project_membership` resource.
//!
//! Addressed by the composite id `project-id:user-id`. Import parses the
//! composite form; read re-assembles it so the state id is stable.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::membership;
use crate::schema::{Attribute, Schema, Validator};
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, Context, ReadOutcome, ResourceHandler};

/// Manages one user's membership in a project.
#[derive(Debug, Default)]
pub struct ProjectMembershipResource;

impl ProjectMembershipResource {
    pub fn new() -> Self {
        Self
    }
}

fn state_pair(state: &Value) -> Result<(String, String), ProviderError> {
    match (
        state.get("project_id").as_str(),
        state.get("user_id").as_str(),
    ) {
        (Some(project), Some(user)) => Ok((project.to_string(), user.to_string())),
        // Imported state may only carry the composite id so far.
        _ => membership::parse_import_id(state.get("id").as_str().unwrap_or_default()),
    }
}

#[async_trait]
impl ResourceHandler for ProjectMembershipResource {
    fn type_name(&self) -> &'static str {
        "firefly_project_membership"
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string().use_state_for_unknown(),
            )
            .with_attribute(
                "project_id",
                Attribute::required_string()
                    .requires_replace()
                    .with_validator(Validator::LengthAtLeast(1)),
            )
            .with_attribute(
                "user_id",
                Attribute::required_string()
                    .requires_replace()
                    .with_validator(Validator::LengthAtLeast(1)),
            )
            .with_attribute("role", Attribute::optional_string())
            .with_attribute("email", Attribute::computed_string())
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        let project_id = planned
            .get("project_id")
            .as_str()
            .ok_or_else(|| ProviderError::Mapping("project_id is required".to_string()))?
            .to_string();
        let request = membership::encode(planned)?;
        let added = ctx.client.members().add(&project_id, &request).await?;
        let fresh = match ctx.client.members().get(&project_id, &added.user_id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: membership::composite_id(&project_id, &added.user_id),
                    source: Box::new(e),
                })
            }
        };
        Ok(membership::decode(&project_id, &fresh))
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let (project_id, user_id) = state_pair(state)?;
        match gone_on_not_found(ctx.client.members().get(&project_id, &user_id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(membership::decode(
                &project_id,
                &fresh,
            ))),
            None => Ok(ReadOutcome::Gone),
        }
    }

    async fn update(
        &self,
        ctx: &Context,
        state: &Value,
        planned: &Value,
    ) -> Result<Value, ProviderError> {
        let (project_id, user_id) = state_pair(state)?;
        let request = membership::encode(planned)?;
        ctx.client
            .members()
            .replace(&project_id, &user_id, &request)
            .await?;
        let fresh = ctx.client.members().get(&project_id, &user_id).await?;
        Ok(membership::decode(&project_id, &fresh))
    }

    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let (project_id, user_id) = state_pair(state)?;
        ignore_not_found(ctx.client.members().remove(&project_id, &user_id).await)
    }

    async fn import(&self, _ctx: &Context, id: &str) -> Result<Value, ProviderError> {
        let (project_id, user_id) = membership::parse_import_id(id)?;
        Ok(Value::object([
            (
                "id",
                Value::string(membership::composite_id(&project_id, &user_id)),
            ),
            ("project_id", Value::string(project_id)),
            ("user_id", Value::string(user_id)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_import_seeds_composite_state() {
        let resource = ProjectMembershipResource::new();
        let ctx = Context::new(
            crate::client::FireflyClient::new("https://example.test", "ak", "sk").unwrap(),
        );
        let state = resource.import(&ctx, " proj-1:user-42 ").await.unwrap();
        assert_eq!(state.get("id").as_str(), Some("proj-1:user-42"));
        assert_eq!(state.get("project_id").as_str(), Some("proj-1"));
        assert_eq!(state.get("user_id").as_str(), Some("user-42"));
    }

    #[tokio::test]
    async fn test_import_rejects_plain_id() {
        let resource = ProjectMembershipResource::new();
        let ctx = Context::new(
            crate::client::FireflyClient::new("https://example.test", "ak", "sk").unwrap(),
        );
        assert!(matches!(
            resource.import(&ctx, "proj-1").await,
            Err(ProviderError::InvalidImportId(_))
        ));
    }
}
