//! Firefly Provider
//!
//! A declarative-infrastructure provider for the Firefly governance and
//! workflow platform. The host drives plan/apply/read/delete over a catalog
//! of managed kinds (projects, variable sets, guardrails, governance
//! policies and insights, backup policies, runners workspaces, workspace
//! labels, project memberships), and this crate reconciles them against
//! Firefly's HTTP JSON API.
//!
//! # Overview
//!
//! - **Values**: a three-valued model (known / null / unknown) mirroring the
//!   host's view of configuration during planning.
//! - **Schema types**: attribute declarations with flags, defaults,
//!   validators, and plan modifiers.
//! - **Planning**: default application, computed-attribute resolution, and
//!   change detection driven off the schemas.
//! - **Client**: a retrying, re-authenticating HTTP transport with one
//!   typed sub-client per API domain.
//! - **Mapping**: encode/decode between declared state and wire shapes,
//!   preserving null/empty distinctions and erasing injected wildcards.
//! - **Resources**: one reconciler handler per managed kind, plus read-only
//!   data sources and the registry tying names to handlers.
//!
//! # Quick Start
//!
//! ```ignore
//! use firefly_provider::{init_logging, FireflyProvider, ProviderService};
//! use firefly_provider::values::Value;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!     let provider = FireflyProvider::new();
//!     provider
//!         .configure(&Value::object([
//!             ("access_key", Value::string("...")),
//!             ("secret_key", Value::string("...")),
//!         ]))
//!         .await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod datasources;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod plan;
pub mod provider;
pub mod registry;
pub mod resources;
pub mod schema;
pub mod testing;
pub mod validation;
pub mod values;

// Re-export main types at crate root
pub use client::{FireflyClient, DEFAULT_API_URL};
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use logging::{init_logging, try_init_logging};
pub use plan::{plan_resource, AttributeChange, PlanResult};
pub use provider::{FireflyProvider, ProviderService};
pub use registry::Registry;
pub use resources::{Context, ReadOutcome, ResourceHandler};
pub use schema::{Diagnostic, ProviderSchema};
pub use validation::{is_valid, validate, validate_result, validate_schedule};
pub use values::Value;

// Re-export async_trait for handler implementations
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
