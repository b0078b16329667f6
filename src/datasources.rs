//! Read-only data source views over the Firefly API.
//!
//! Singular sources (`firefly_project`, `firefly_workspace`) look up one
//! entity by id or exact name; plural sources list with optional search and
//! an item cap.

use async_trait::async_trait;

use crate::client::ListQuery;
use crate::error::ProviderError;
use crate::mapping;
use crate::resources::Context;
use crate::schema::{Attribute, Schema};
use crate::values::Value;

/// Upper bound on entities a plural data source will collect.
const LIST_CAP: usize = 5_000;

/// The read side of one data source kind.
#[async_trait]
pub trait DataSourceHandler: Send + Sync + 'static {
    /// The fully-qualified type name, e.g. `firefly_projects`.
    fn type_name(&self) -> &'static str;

    /// The data source's schema.
    fn schema(&self) -> Schema;

    /// Resolve the configured query into state.
    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError>;
}

fn list_query(config: &Value) -> ListQuery {
    let mut query = ListQuery::default().with_page_size(100);
    if let Some(search) = config.get("search").as_str() {
        query = query.with_search(search);
    }
    query
}

fn list_cap(config: &Value) -> Option<usize> {
    match config.get("max_items").as_int() {
        Some(n) if n > 0 => Some(n as usize),
        _ => Some(LIST_CAP),
    }
}

fn singular_schema() -> Schema {
    Schema::v0()
        .with_attribute("id", Attribute::optional_computed_string())
        .with_attribute("name", Attribute::optional_computed_string())
}

fn plural_schema(items_attr: &str) -> Schema {
    Schema::v0()
        .with_attribute("search", Attribute::optional_string())
        .with_attribute("max_items", Attribute::optional_int64())
        .with_attribute(
            items_attr,
            Attribute::new(
                crate::schema::AttributeType::List(Box::new(crate::schema::AttributeType::String)),
                crate::schema::AttributeFlags::computed(),
            ),
        )
}

fn lookup_error(type_name: &str) -> ProviderError {
    ProviderError::InvalidConfig(format!(
        "{} requires either id or name to be set",
        type_name
    ))
}

/// Looks up one project by id or exact name.
#[derive(Debug, Default)]
pub struct ProjectDataSource;

#[async_trait]
impl DataSourceHandler for ProjectDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_project"
    }

    fn schema(&self) -> Schema {
        singular_schema()
            .with_attribute("description", Attribute::computed_string())
            .with_attribute("labels", Attribute::new(
                crate::schema::AttributeType::List(Box::new(crate::schema::AttributeType::String)),
                crate::schema::AttributeFlags::computed(),
            ))
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let projects = ctx.client.projects();
        let response = if let Some(id) = config.get("id").as_str() {
            projects.get(id).await?
        } else if let Some(name) = config.get("name").as_str() {
            let matches = projects
                .list_all(&ListQuery::default().with_search(name), Some(LIST_CAP))
                .await?;
            matches
                .into_iter()
                .find(|p| p.name == name)
                .ok_or_else(|| ProviderError::NotFound(format!("project named {:?}", name)))?
        } else {
            return Err(lookup_error(self.type_name()));
        };
        Ok(mapping::project::decode(&response, &Value::Null))
    }
}

/// Lists projects with optional search.
#[derive(Debug, Default)]
pub struct ProjectsDataSource;

#[async_trait]
impl DataSourceHandler for ProjectsDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_projects"
    }

    fn schema(&self) -> Schema {
        plural_schema("projects")
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let all = ctx
            .client
            .projects()
            .list_all(&list_query(config), list_cap(config))
            .await?;
        let items = all
            .iter()
            .map(|p| mapping::project::decode(p, &Value::Null))
            .collect();
        Ok(Value::object([("projects", Value::List(items))]))
    }
}

/// Looks up one workspace by id or exact name.
#[derive(Debug, Default)]
pub struct WorkspaceDataSource;

fn decode_workspace(response: &crate::client::workspaces::WorkspaceResponse) -> Value {
    Value::object([
        ("id", Value::string(&response.id)),
        ("name", Value::string(&response.name)),
        (
            "repository",
            mapping::opt_string_value(response.repository.as_deref()),
        ),
        (
            "labels",
            mapping::opt_string_list_value(response.labels.as_ref(), &Value::Null),
        ),
        (
            "last_run_status",
            mapping::opt_string_value(response.last_run_status.as_deref()),
        ),
    ])
}

#[async_trait]
impl DataSourceHandler for WorkspaceDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_workspace"
    }

    fn schema(&self) -> Schema {
        singular_schema()
            .with_attribute("repository", Attribute::computed_string())
            .with_attribute("last_run_status", Attribute::computed_string())
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let workspaces = ctx.client.workspaces();
        let response = if let Some(id) = config.get("id").as_str() {
            workspaces.get(id).await?
        } else if let Some(name) = config.get("name").as_str() {
            let matches = workspaces
                .list_all(&ListQuery::default().with_search(name), Some(LIST_CAP))
                .await?;
            matches
                .into_iter()
                .find(|w| w.name == name)
                .ok_or_else(|| ProviderError::NotFound(format!("workspace named {:?}", name)))?
        } else {
            return Err(lookup_error(self.type_name()));
        };
        Ok(decode_workspace(&response))
    }
}

/// Lists workspaces with optional search.
#[derive(Debug, Default)]
pub struct WorkspacesDataSource;

#[async_trait]
impl DataSourceHandler for WorkspacesDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_workspaces"
    }

    fn schema(&self) -> Schema {
        plural_schema("workspaces")
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let all = ctx
            .client
            .workspaces()
            .list_all(&list_query(config), list_cap(config))
            .await?;
        let items = all.iter().map(decode_workspace).collect();
        Ok(Value::object([("workspaces", Value::List(items))]))
    }
}

/// Lists variable sets with optional search.
#[derive(Debug, Default)]
pub struct VariableSetsDataSource;

#[async_trait]
impl DataSourceHandler for VariableSetsDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_variable_sets"
    }

    fn schema(&self) -> Schema {
        plural_schema("variable_sets")
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let all = ctx
            .client
            .variable_sets()
            .list_all(&list_query(config), list_cap(config))
            .await?;
        let items = all
            .iter()
            .map(|v| mapping::variable_set::decode(v, &Value::Null))
            .collect();
        Ok(Value::object([("variable_sets", Value::List(items))]))
    }
}

/// Lists guardrails with optional search.
#[derive(Debug, Default)]
pub struct GuardrailsDataSource;

#[async_trait]
impl DataSourceHandler for GuardrailsDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_guardrails"
    }

    fn schema(&self) -> Schema {
        plural_schema("guardrails")
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let all = ctx
            .client
            .guardrails()
            .list_all(&list_query(config), list_cap(config))
            .await?;
        let items = all
            .iter()
            .map(|g| mapping::guardrail::decode(g, &Value::Null))
            .collect();
        Ok(Value::object([("guardrails", Value::List(items))]))
    }
}

/// Lists governance policies with optional search; can be restricted to
/// providers available to the tenant.
#[derive(Debug, Default)]
pub struct GovernancePoliciesDataSource;

fn governance_query(config: &Value) -> ListQuery {
    let mut query = list_query(config);
    if config.get("only_available_providers").as_bool() == Some(true) {
        query = query.with_only_available_providers();
    }
    query
}

#[async_trait]
impl DataSourceHandler for GovernancePoliciesDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_governance_policies"
    }

    fn schema(&self) -> Schema {
        plural_schema("policies")
            .with_attribute("only_available_providers", Attribute::optional_bool())
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let all = ctx
            .client
            .governance()
            .list_all_policies(&governance_query(config), list_cap(config))
            .await?;
        let mut items = Vec::with_capacity(all.len());
        for policy in &all {
            items.push(mapping::governance::decode_policy(policy, &Value::Null)?);
        }
        Ok(Value::object([("policies", Value::List(items))]))
    }
}

/// Lists governance insights with optional search.
#[derive(Debug, Default)]
pub struct GovernanceInsightsDataSource;

#[async_trait]
impl DataSourceHandler for GovernanceInsightsDataSource {
    fn type_name(&self) -> &'static str {
        "firefly_governance_insights"
    }

    fn schema(&self) -> Schema {
        plural_schema("insights")
            .with_attribute("only_available_providers", Attribute::optional_bool())
    }

    async fn read(&self, ctx: &Context, config: &Value) -> Result<Value, ProviderError> {
        let all = ctx
            .client
            .governance()
            .list_all_insights(&governance_query(config), list_cap(config))
            .await?;
        let mut items = Vec::with_capacity(all.len());
        for insight in &all {
            items.push(mapping::governance::decode_insight(insight, &Value::Null)?);
        }
        Ok(Value::object([("insights", Value::List(items))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_reads_search() {
        let config = Value::object([("search", Value::string("prod"))]);
        let params = list_query(&config).to_params();
        assert!(params.contains(&("search".to_string(), "prod".to_string())));
    }

    #[test]
    fn test_list_cap_defaults() {
        assert_eq!(list_cap(&Value::Null), Some(LIST_CAP));
        let config = Value::object([("max_items", Value::Int(25))]);
        assert_eq!(list_cap(&config), Some(25));
        let config = Value::object([("max_items", Value::Int(0))]);
        assert_eq!(list_cap(&config), Some(LIST_CAP));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ProjectDataSource.type_name(), "firefly_project");
        assert_eq!(ProjectsDataSource.type_name(), "firefly_projects");
        assert_eq!(
            GovernanceInsightsDataSource.type_name(),
            "firefly_governance_insights"
        );
    }
}
