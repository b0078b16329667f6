//! The resource and data source registry.
//!
//! Built once at provider start and immutable afterwards. The legacy
//! `firefly_workflows_*` names are aliases sharing the same handlers as
//! their canonical kinds.

use std::collections::HashMap;
use std::sync::Arc;

use crate::datasources::{
    DataSourceHandler, GovernanceInsightsDataSource, GovernancePoliciesDataSource,
    GuardrailsDataSource, ProjectDataSource, ProjectsDataSource, VariableSetsDataSource,
    WorkspaceDataSource, WorkspacesDataSource,
};
use crate::error::ProviderError;
use crate::resources::{
    backup_policy::BackupPolicyResource, governance_insight::GovernanceInsightResource,
    governance_policy::GovernancePolicyResource, guardrail::GuardrailResource,
    project::ProjectResource, project_membership::ProjectMembershipResource,
    runners_workspace::RunnersWorkspaceResource, variable_set::VariableSetResource,
    workspace_labels::WorkspaceLabelsResource, ResourceHandler,
};
use crate::schema::ProviderSchema;

/// Immutable lookup tables from type name to handler.
pub struct Registry {
    resources: HashMap<&'static str, Arc<dyn ResourceHandler>>,
    data_sources: HashMap<&'static str, Arc<dyn DataSourceHandler>>,
}

impl Registry {
    /// Build the full catalog, including the `firefly_workflows_*` aliases.
    pub fn standard() -> Self {
        let mut resources: HashMap<&'static str, Arc<dyn ResourceHandler>> = HashMap::new();
        let mut data_sources: HashMap<&'static str, Arc<dyn DataSourceHandler>> = HashMap::new();

        let project = Arc::new(ProjectResource::new());
        let variable_set = Arc::new(VariableSetResource::new());
        let guardrail = Arc::new(GuardrailResource::new());
        let runners_workspace = Arc::new(RunnersWorkspaceResource::new());

        resources.insert("firefly_project", project.clone());
        resources.insert("firefly_variable_set", variable_set.clone());
        resources.insert("firefly_guardrail", guardrail.clone());
        resources.insert("firefly_backup_policy", Arc::new(BackupPolicyResource::new()));
        resources.insert(
            "firefly_governance_policy",
            Arc::new(GovernancePolicyResource::new()),
        );
        resources.insert(
            "firefly_governance_insight",
            Arc::new(GovernanceInsightResource::new()),
        );
        resources.insert("firefly_runners_workspace", runners_workspace.clone());
        resources.insert(
            "firefly_workspace_labels",
            Arc::new(WorkspaceLabelsResource::new()),
        );
        resources.insert(
            "firefly_project_membership",
            Arc::new(ProjectMembershipResource::new()),
        );

        // Legacy aliases from the workflows-era naming.
        resources.insert("firefly_workflows_project", project);
        resources.insert("firefly_workflows_variable_set", variable_set);
        resources.insert("firefly_workflows_guardrail", guardrail);
        resources.insert("firefly_workflows_runners_workspace", runners_workspace);

        data_sources.insert("firefly_project", Arc::new(ProjectDataSource));
        data_sources.insert("firefly_projects", Arc::new(ProjectsDataSource));
        data_sources.insert("firefly_workspace", Arc::new(WorkspaceDataSource));
        data_sources.insert("firefly_workspaces", Arc::new(WorkspacesDataSource));
        data_sources.insert("firefly_variable_sets", Arc::new(VariableSetsDataSource));
        data_sources.insert("firefly_guardrails", Arc::new(GuardrailsDataSource));
        data_sources.insert(
            "firefly_governance_policies",
            Arc::new(GovernancePoliciesDataSource),
        );
        data_sources.insert(
            "firefly_governance_insights",
            Arc::new(GovernanceInsightsDataSource),
        );

        Self {
            resources,
            data_sources,
        }
    }

    /// Look up a resource handler.
    pub fn resource(&self, type_name: &str) -> Result<&Arc<dyn ResourceHandler>, ProviderError> {
        self.resources
            .get(type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Look up a data source handler.
    pub fn data_source(
        &self,
        type_name: &str,
    ) -> Result<&Arc<dyn DataSourceHandler>, ProviderError> {
        self.data_sources
            .get(type_name)
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    /// Registered resource type names.
    pub fn resource_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    /// Registered data source type names.
    pub fn data_source_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.keys().copied()
    }

    /// The full provider schema across every registered kind. Aliases carry
    /// the same schema as their canonical kind.
    pub fn provider_schema(&self, provider_config: crate::schema::Schema) -> ProviderSchema {
        let mut schema = ProviderSchema::new().with_provider_config(provider_config);
        for (name, handler) in &self.resources {
            schema = schema.with_resource(*name, handler.schema());
        }
        for (name, handler) in &self.data_sources {
            schema = schema.with_data_source(*name, handler.schema());
        }
        schema
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("resources", &self.resources.len())
            .field("data_sources", &self.data_sources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_registered() {
        let registry = Registry::standard();
        for name in [
            "firefly_project",
            "firefly_variable_set",
            "firefly_guardrail",
            "firefly_backup_policy",
            "firefly_governance_policy",
            "firefly_governance_insight",
            "firefly_runners_workspace",
            "firefly_workspace_labels",
            "firefly_project_membership",
        ] {
            assert!(registry.resource(name).is_ok(), "missing {}", name);
        }
        assert!(registry.resource("firefly_widget").is_err());
    }

    #[test]
    fn test_workflows_aliases_share_handlers() {
        let registry = Registry::standard();
        let canonical = registry.resource("firefly_project").unwrap();
        let alias = registry.resource("firefly_workflows_project").unwrap();
        assert!(Arc::ptr_eq(canonical, alias));

        let canonical = registry.resource("firefly_guardrail").unwrap();
        let alias = registry.resource("firefly_workflows_guardrail").unwrap();
        assert!(Arc::ptr_eq(canonical, alias));
    }

    #[test]
    fn test_data_sources_registered() {
        let registry = Registry::standard();
        assert!(registry.data_source("firefly_governance_policies").is_ok());
        assert!(registry.data_source("firefly_workspaces").is_ok());
        assert!(registry.data_source("firefly_nope").is_err());
    }
}
