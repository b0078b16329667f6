//! The authenticated HTTP/JSON transport shared by all Firefly sub-clients.
//!
//! One transport exists per configured provider. It exchanges the access-key /
//! secret-key pair for a bearer token at first use, refreshes the token lazily
//! when the remote answers 401, classifies every failure into a stable error
//! kind, and retries transient failures with exponential backoff and jitter.
//!
//! Mutating verbs (POST/PATCH/PUT) are only retried on network-level failures
//! where no response was read; GET and DELETE retry freely on any transient
//! classification. Host-side cancellation is dropping the returned future;
//! the retry loop additionally enforces the total time budget so a call can
//! never spin past it.

use std::time::{Duration, Instant};

use rand::Rng;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ProviderError;

/// Default production endpoint, overridable via configuration or
/// `FIREFLY_API_URL`.
pub const DEFAULT_API_URL: &str = "https://api.firefly.ai/v2";

const RETRY_BASE: Duration = Duration::from_millis(200);
const RETRY_FACTOR: u32 = 2;
const RETRY_JITTER: f64 = 0.25;
const MAX_ATTEMPTS: u32 = 5;
const MAX_TOTAL: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "accessKey")]
    access_key: &'a str,
    #[serde(rename = "secretKey")]
    secret_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "accessToken", alias = "token")]
    access_token: String,
}

/// The process-wide Firefly HTTP transport.
///
/// Safe for concurrent use: the underlying `reqwest::Client` shares its
/// connection pool, and per-call state lives on the stack. Token refresh
/// takes the write lock for the duration of the refresh; concurrent callers
/// block on the read lock until it completes.
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
    secret_key: String,
    token: RwLock<Option<String>>,
}

impl Transport {
    /// Create a transport against `base_url` with the given credential pair.
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            token: RwLock::new(None),
        })
    }

    /// The base URL this transport talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ProviderError> {
        self.request_json(Method::GET, path, query, None).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ProviderError> {
        self.request_json(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a JSON body and decode the JSON response.
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ProviderError> {
        self.request_json(Method::PUT, path, &[], Some(body)).await
    }

    /// PATCH a JSON body and decode the JSON response.
    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ProviderError> {
        self.request_json(Method::PATCH, path, &[], Some(body)).await
    }

    /// PUT a JSON body, discarding any response body.
    pub async fn put_empty(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), ProviderError> {
        self.request_raw(Method::PUT, path, &[], Some(body)).await?;
        Ok(())
    }

    /// DELETE, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ProviderError> {
        self.request_raw(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Issue a request and decode the response body as JSON.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, ProviderError> {
        let bytes = self.request_raw(method, path, query, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| ProviderError::Malformed(e.to_string()))
    }

    /// Issue a request with classification and retry, returning raw bytes.
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let idempotent = matches!(method, Method::GET | Method::DELETE | Method::HEAD);
        let deadline = Instant::now() + MAX_TOTAL;
        let mut refreshed = false;
        let mut attempt = 1u32;

        loop {
            debug!(%method, %url, attempt, "firefly request");
            let token = self.current_token().await?;

            let mut request = self
                .http
                .request(method.clone(), &url)
                .bearer_auth(&token)
                .query(query);
            if let Some(body) = body {
                request = request.json(body);
            }

            // `pre_response` marks failures where no response was read, the
            // only case where a mutating verb may be retried.
            let (err, pre_response) = match request.send().await {
                Ok(response) => match self.classify_response(response).await {
                    Ok(bytes) => return Ok(bytes),
                    Err(e) => (e, false),
                },
                Err(e) if e.is_connect() => (ProviderError::Transient(e.to_string()), true),
                // Timeouts may interrupt a response mid-read; only safe to
                // retry for idempotent verbs.
                Err(e) if e.is_timeout() && idempotent => {
                    (ProviderError::Transient(e.to_string()), false)
                }
                Err(e) => return Err(e.into()),
            };

            match err {
                ProviderError::Unauthorized(msg) => {
                    if refreshed {
                        return Err(ProviderError::Unauthorized(msg));
                    }
                    warn!(%url, "bearer token rejected, refreshing");
                    refreshed = true;
                    self.refresh_token().await?;
                }
                err if err.is_transient() => {
                    if !idempotent && !pre_response {
                        return Err(err);
                    }
                    if attempt >= MAX_ATTEMPTS {
                        return Err(err);
                    }
                    let delay = backoff_delay(attempt);
                    if Instant::now() + delay >= deadline {
                        return Err(err);
                    }
                    debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                err => return Err(err),
            }
        }
    }

    /// Classify a received response into bytes or a stable error kind.
    async fn classify_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<u8>, ProviderError> {
        let status = response.status();
        let bytes = response.bytes().await.map(|b| b.to_vec()).unwrap_or_default();

        if status.is_success() {
            return Ok(bytes);
        }

        let text = String::from_utf8_lossy(&bytes).into_owned();
        let detail = if text.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {}", status.as_u16(), text.trim())
        };

        match status {
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound(detail)),
            StatusCode::CONFLICT => Err(ProviderError::Conflict(detail)),
            StatusCode::UNAUTHORIZED => Err(ProviderError::Unauthorized(detail)),
            StatusCode::FORBIDDEN => Err(ProviderError::Unauthorized(detail)),
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
                Err(ProviderError::Transient(detail))
            }
            s if s.is_server_error() => Err(ProviderError::Transient(detail)),
            // Some endpoints answer 200-family siblings or 400 with a
            // body-embedded "not found" instead of a 404.
            _ if text.to_ascii_lowercase().contains("not found") => {
                Err(ProviderError::NotFound(detail))
            }
            _ => Err(ProviderError::Upstream(detail)),
        }
    }

    /// The current bearer token, logging in if none is held yet.
    async fn current_token(&self) -> Result<String, ProviderError> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }
        self.refresh_token().await
    }

    /// Exchange the credential pair for a fresh bearer token.
    ///
    /// Holds the write lock for the whole exchange; concurrent callers block
    /// and then observe the new token.
    async fn refresh_token(&self) -> Result<String, ProviderError> {
        let mut guard = self.token.write().await;

        let url = format!("{}/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                access_key: &self.access_key,
                secret_key: &self.secret_key,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Unauthorized(format!(
                "login failed with status {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(format!("login response: {}", e)))?;

        *guard = Some(login.access_token.clone());
        debug!("bearer token refreshed");
        Ok(login.access_token)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials and token stay out of debug output.
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Exponential backoff with ±25% jitter: 200ms, 400ms, 800ms, ...
fn backoff_delay(attempt: u32) -> Duration {
    let base = RETRY_BASE.as_millis() as f64 * f64::from(RETRY_FACTOR.pow(attempt - 1));
    let jitter = rand::thread_rng().gen_range((1.0 - RETRY_JITTER)..=(1.0 + RETRY_JITTER));
    Duration::from_millis((base * jitter) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delay_grows_and_jitters() {
        for attempt in 1..=MAX_ATTEMPTS {
            let delay = backoff_delay(attempt);
            let base = 200u64 * 2u64.pow(attempt - 1);
            let min = base * 3 / 4;
            let max = base * 5 / 4;
            let ms = delay.as_millis() as u64;
            assert!(ms >= min && ms <= max, "attempt {}: {}ms", attempt, ms);
        }
    }

    #[test]
    fn test_total_worst_case_under_budget() {
        // 5 attempts means 4 sleeps: 250 + 500 + 1000 + 2000 ms at worst,
        // well inside the 30s budget.
        let worst: u64 = (1..MAX_ATTEMPTS).map(|a| 200 * 2u64.pow(a - 1) * 5 / 4).sum();
        assert!(Duration::from_millis(worst) < MAX_TOTAL);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let t = Transport::new("https://api.example.com/v2/", "ak", "sk").unwrap();
        assert_eq!(t.base_url(), "https://api.example.com/v2");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let t = Transport::new("https://api.example.com", "ak-secret", "sk-secret").unwrap();
        let out = format!("{:?}", t);
        assert!(!out.contains("ak-secret"));
        assert!(!out.contains("sk-secret"));
    }
}
