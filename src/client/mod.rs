//! Typed clients for the Firefly HTTP API.
//!
//! One sub-client per domain, all sharing a single [`Transport`]. Sub-clients
//! own the request/response wire shapes; translation to and from declared
//! state lives in the `mapping` module.

pub mod backup;
pub mod governance;
pub mod guardrails;
pub mod members;
pub mod projects;
pub mod runners;
pub mod transport;
pub mod variable_sets;
pub mod workspaces;

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
pub use transport::{Transport, DEFAULT_API_URL};

/// An include/exclude pair of wildcard patterns, used by every scope filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSetWire {
    /// Patterns to include; `["*"]` matches everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Patterns to exclude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl PatternSetWire {
    /// The wildcard set `{include: ["*"]}` the remote requires when the user
    /// declared nothing.
    pub fn wildcard() -> Self {
        Self {
            include: Some(vec!["*".to_string()]),
            exclude: None,
        }
    }

    /// Whether this is exactly the injected wildcard set.
    pub fn is_wildcard(&self) -> bool {
        self.include.as_deref() == Some(&["*".to_string()][..])
            && self.exclude.as_deref().map_or(true, |e| e.is_empty())
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The entities on this page.
    pub data: Vec<T>,
    /// Total matching entities across all pages.
    #[serde(default)]
    pub total: i64,
    /// Whether more pages follow.
    #[serde(default)]
    pub has_more: bool,
}

/// Query parameters common to list endpoints.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// 1-based page index.
    pub page: u32,
    /// Page size, clamped to 1..=500 on the wire.
    pub page_size: u32,
    /// Optional free-text search.
    pub search: Option<String>,
    /// Optional multi-valued filters, repeated on the wire.
    pub filters: Vec<(String, String)>,
    /// Restrict governance listings to providers available to the tenant.
    pub only_available_providers: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
            search: None,
            filters: Vec::new(),
            only_available_providers: false,
        }
    }
}

impl ListQuery {
    /// A query for the given page.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the search string.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Add a filter key/value pair.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Restrict governance listings to available providers.
    pub fn with_only_available_providers(mut self) -> Self {
        self.only_available_providers = true;
        self
    }

    /// Render as wire query parameters, clamping page and page size.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.max(1).to_string()),
            (
                "pageSize".to_string(),
                self.page_size.clamp(1, 500).to_string(),
            ),
        ];
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.clone()));
        }
        if self.only_available_providers {
            params.push(("onlyAvailableProviders".to_string(), "true".to_string()));
        }
        params
    }
}

/// Fetch pages until `has_more` is false or `cap` entities were collected.
pub(crate) async fn paginate<T, F, Fut>(
    query: &ListQuery,
    cap: Option<usize>,
    mut fetch: F,
) -> Result<Vec<T>, ProviderError>
where
    F: FnMut(ListQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, ProviderError>>,
{
    let mut out = Vec::new();
    let mut current = query.clone();
    current.page = current.page.max(1);

    loop {
        let page = fetch(current.clone()).await?;
        let empty = page.data.is_empty();
        out.extend(page.data);

        if let Some(cap) = cap {
            if out.len() >= cap {
                out.truncate(cap);
                break;
            }
        }
        if !page.has_more || empty {
            break;
        }
        current.page += 1;
    }

    Ok(out)
}

/// The aggregate Firefly API client handed to resource handlers.
#[derive(Debug, Clone)]
pub struct FireflyClient {
    transport: Arc<Transport>,
}

impl FireflyClient {
    /// Build a client against `base_url` with the given credential pair.
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: Arc::new(Transport::new(base_url, access_key, secret_key)?),
        })
    }

    /// The shared transport.
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// The projects sub-client.
    pub fn projects(&self) -> projects::ProjectsClient {
        projects::ProjectsClient::new(Arc::clone(&self.transport))
    }

    /// The workspaces sub-client.
    pub fn workspaces(&self) -> workspaces::WorkspacesClient {
        workspaces::WorkspacesClient::new(Arc::clone(&self.transport))
    }

    /// The variable sets sub-client.
    pub fn variable_sets(&self) -> variable_sets::VariableSetsClient {
        variable_sets::VariableSetsClient::new(Arc::clone(&self.transport))
    }

    /// The guardrails sub-client.
    pub fn guardrails(&self) -> guardrails::GuardrailsClient {
        guardrails::GuardrailsClient::new(Arc::clone(&self.transport))
    }

    /// The governance (insights + policies) sub-client.
    pub fn governance(&self) -> governance::GovernanceClient {
        governance::GovernanceClient::new(Arc::clone(&self.transport))
    }

    /// The backup-and-DR sub-client.
    pub fn backup(&self) -> backup::BackupClient {
        backup::BackupClient::new(Arc::clone(&self.transport))
    }

    /// The project members sub-client.
    pub fn members(&self) -> members::MembersClient {
        members::MembersClient::new(Arc::clone(&self.transport))
    }

    /// The runners workspaces sub-client.
    pub fn runners(&self) -> runners::RunnersClient {
        runners::RunnersClient::new(Arc::clone(&self.transport))
    }
}
