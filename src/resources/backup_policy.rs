//! The `firefly_backup_policy` resource.
//!
//! Status lives behind its own endpoint. The reconciler sequences the
//! status toggle strictly after the create or update it refines, and only
//! issues it when the status actually changed.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::mapping::backup;
use crate::schema::{Attribute, Block, NestedBlock, Schema, Validator};
use crate::validation::validate_schedule;
use crate::values::Value;

use super::{gone_on_not_found, ignore_not_found, state_id, Context, ReadOutcome, ResourceHandler};

const STATUS_ACTIVE: &str = "Active";

/// Manages a Firefly backup-and-DR policy.
#[derive(Debug, Default)]
pub struct BackupPolicyResource;

impl BackupPolicyResource {
    pub fn new() -> Self {
        Self
    }
}

fn desired_status(planned: &Value) -> &str {
    planned.get("status").as_str().unwrap_or(STATUS_ACTIVE)
}

#[async_trait]
impl ResourceHandler for BackupPolicyResource {
    fn type_name(&self) -> &'static str {
        "firefly_backup_policy"
    }

    fn schema(&self) -> Schema {
        let schedule = Block::new()
            .with_attribute(
                "frequency",
                Attribute::required_string().with_validator(Validator::OneOf(vec![
                    "one_time".to_string(),
                    "daily".to_string(),
                    "weekly".to_string(),
                    "monthly".to_string(),
                    "cron".to_string(),
                ])),
            )
            .with_attribute("hour", Attribute::optional_int64())
            .with_attribute("minute", Attribute::optional_int64())
            .with_attribute("days_of_week", Attribute::optional_string_list())
            .with_attribute("monthly_type", Attribute::optional_string())
            .with_attribute("day_of_month", Attribute::optional_int64())
            .with_attribute("weekday_ordinal", Attribute::optional_string())
            .with_attribute("weekday_name", Attribute::optional_string())
            // Computed even for non-cron frequencies: the remote may echo a
            // synthesized expression, which decode treats as opaque.
            .with_attribute("cron_expression", Attribute::optional_computed_string());

        Schema::v0()
            .with_attribute(
                "id",
                Attribute::computed_string().use_state_for_unknown(),
            )
            .with_attribute(
                "policy_name",
                Attribute::required_string().with_validator(Validator::LengthAtLeast(1)),
            )
            .with_attribute("description", Attribute::optional_string())
            .with_attribute("workspaces", Attribute::optional_string_list())
            .with_attribute(
                "status",
                Attribute::optional_computed_string()
                    .with_default(Value::string(STATUS_ACTIVE))
                    .with_validator(Validator::OneOf(vec![
                        "Active".to_string(),
                        "Inactive".to_string(),
                    ])),
            )
            .with_attribute("retention_days", Attribute::optional_int64())
            .with_block(
                "schedule",
                NestedBlock::single(schedule).with_min_items(1),
            )
    }

    fn validate_config(&self, config: &Value) -> Vec<crate::schema::Diagnostic> {
        let schedule = config.get("schedule");
        // Unresolved values are validated again at apply time.
        if schedule.is_null() || schedule.contains_unknown() {
            return Vec::new();
        }
        match validate_schedule(config.get("schedule")) {
            Ok(()) => Vec::new(),
            Err(e) => vec![e
                .into_diagnostic("Invalid backup schedule")
                .with_attribute("schedule")],
        }
    }

    async fn create(&self, ctx: &Context, planned: &Value) -> Result<Value, ProviderError> {
        validate_schedule(planned.get("schedule"))?;
        let request = backup::encode(planned)?;
        let created = ctx.client.backup().create(&request).await?;

        // New policies come up Active; toggle only when Inactive was asked
        // for, and only after the create response was observed.
        let wanted = desired_status(planned);
        if wanted != STATUS_ACTIVE {
            if let Err(e) = ctx.client.backup().set_status(&created.id, wanted).await {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                });
            }
        }

        let fresh = match ctx.client.backup().get(&created.id).await {
            Ok(fresh) => fresh,
            Err(e) => {
                return Err(ProviderError::PartialCreate {
                    id: created.id,
                    source: Box::new(e),
                })
            }
        };
        Ok(backup::decode(&fresh, planned))
    }

    async fn read(&self, ctx: &Context, state: &Value) -> Result<ReadOutcome, ProviderError> {
        let id = state_id(state)?;
        match gone_on_not_found(ctx.client.backup().get(id).await)? {
            Some(fresh) => Ok(ReadOutcome::Refreshed(backup::decode(&fresh, state))),
            None => Ok(ReadOutcome::Gone),
        }
    }

    async fn update(
        &self,
        ctx: &Context,
        state: &Value,
        planned: &Value,
    ) -> Result<Value, ProviderError> {
        validate_schedule(planned.get("schedule"))?;
        let id = state_id(state)?;
        let request = backup::encode(planned)?;
        ctx.client.backup().update(id, &request).await?;

        // Status toggle runs strictly after the update, and only on change.
        let wanted = desired_status(planned);
        if state.get("status").as_str() != Some(wanted) {
            ctx.client.backup().set_status(id, wanted).await?;
        }

        let fresh = ctx.client.backup().get(id).await?;
        Ok(backup::decode(&fresh, planned))
    }

    async fn delete(&self, ctx: &Context, state: &Value) -> Result<(), ProviderError> {
        let id = state_id(state)?;
        ignore_not_found(ctx.client.backup().delete(id).await)
    }
}
