//! Provider configuration: credentials and endpoint resolution.
//!
//! Explicit configuration wins; the `FIREFLY_ACCESS_KEY`,
//! `FIREFLY_SECRET_KEY`, and `FIREFLY_API_URL` environment variables fill
//! anything left unset.

use crate::client::{FireflyClient, DEFAULT_API_URL};
use crate::error::ProviderError;
use crate::schema::{Attribute, Schema};
use crate::values::Value;

/// Environment variable for the access key half of the credential pair.
pub const ENV_ACCESS_KEY: &str = "FIREFLY_ACCESS_KEY";
/// Environment variable for the secret key half of the credential pair.
pub const ENV_SECRET_KEY: &str = "FIREFLY_SECRET_KEY";
/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "FIREFLY_API_URL";

/// Resolved provider configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// API access key.
    pub access_key: String,
    /// API secret key.
    pub secret_key: String,
    /// Base URL of the Firefly API.
    pub api_url: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// The provider-level configuration schema.
pub fn provider_schema() -> Schema {
    Schema::v0()
        .with_attribute(
            "access_key",
            Attribute::optional_string()
                .sensitive()
                .with_description("Firefly API access key. Falls back to FIREFLY_ACCESS_KEY."),
        )
        .with_attribute(
            "secret_key",
            Attribute::optional_string()
                .sensitive()
                .with_description("Firefly API secret key. Falls back to FIREFLY_SECRET_KEY."),
        )
        .with_attribute(
            "api_url",
            Attribute::optional_string()
                .with_description("Firefly API base URL. Falls back to FIREFLY_API_URL."),
        )
}

impl ProviderConfig {
    /// Resolve configuration from declared attributes and the environment.
    ///
    /// Unknown values are rejected up front: the host must resolve them
    /// before configuring the provider.
    pub fn resolve(config: &Value) -> Result<Self, ProviderError> {
        if config.contains_unknown() {
            return Err(ProviderError::InvalidConfig(
                "provider configuration contains unresolved values".to_string(),
            ));
        }

        let access_key = resolve_attr(config, "access_key", ENV_ACCESS_KEY);
        let secret_key = resolve_attr(config, "secret_key", ENV_SECRET_KEY);
        let api_url = resolve_attr(config, "api_url", ENV_API_URL)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let access_key = access_key.ok_or_else(|| {
            ProviderError::InvalidConfig(format!(
                "access_key must be set in configuration or via {}",
                ENV_ACCESS_KEY
            ))
        })?;
        let secret_key = secret_key.ok_or_else(|| {
            ProviderError::InvalidConfig(format!(
                "secret_key must be set in configuration or via {}",
                ENV_SECRET_KEY
            ))
        })?;

        Ok(Self {
            access_key,
            secret_key,
            api_url,
        })
    }

    /// Build the API client for this configuration.
    pub fn client(&self) -> Result<FireflyClient, ProviderError> {
        FireflyClient::new(&self.api_url, &self.access_key, &self.secret_key)
    }
}

fn resolve_attr(config: &Value, attr: &str, env_var: &str) -> Option<String> {
    match config.get(attr).as_str() {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => std::env::var(env_var).ok().filter(|s| !s.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_wins() {
        let config = Value::object([
            ("access_key", Value::string("ak")),
            ("secret_key", Value::string("sk")),
            ("api_url", Value::string("https://api.example.test/v2")),
        ]);
        let resolved = ProviderConfig::resolve(&config).unwrap();
        assert_eq!(resolved.access_key, "ak");
        assert_eq!(resolved.api_url, "https://api.example.test/v2");
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = Value::object([("api_url", Value::string("https://api.example.test"))]);
        // Ignore the env fallback here; the variables are absent in CI.
        if std::env::var(ENV_ACCESS_KEY).is_err() {
            assert!(matches!(
                ProviderConfig::resolve(&config),
                Err(ProviderError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_unknown_config_rejected() {
        let config = Value::object([
            ("access_key", Value::Unknown),
            ("secret_key", Value::string("sk")),
        ]);
        assert!(matches!(
            ProviderConfig::resolve(&config),
            Err(ProviderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = ProviderConfig {
            access_key: "ak-123".to_string(),
            secret_key: "sk-456".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("ak-123"));
        assert!(!rendered.contains("sk-456"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_default_api_url_applied() {
        let config = Value::object([
            ("access_key", Value::string("ak")),
            ("secret_key", Value::string("sk")),
        ]);
        if std::env::var(ENV_API_URL).is_err() {
            let resolved = ProviderConfig::resolve(&config).unwrap();
            assert_eq!(resolved.api_url, DEFAULT_API_URL);
        }
    }

    #[test]
    fn test_provider_schema_marks_credentials_sensitive() {
        let schema = provider_schema();
        assert!(schema.is_sensitive("access_key"));
        assert!(schema.is_sensitive("secret_key"));
        assert!(!schema.is_sensitive("api_url"));
    }
}
