//! reqwest-backed implementation of the generator traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use themer::{
    ErrorBody, GenerateError, GenerationRequest, LogoGenerator, LogoRequest, LogoResponse,
    ThemeGenerator,
};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Path of the theme generation endpoint.
pub const THEME_PATH: &str = "/api/generate-theme";

/// Path of the logo generation endpoint.
pub const LOGO_PATH: &str = "/api/generate-logo";

const USER_AGENT: &str = concat!("themer/", env!("CARGO_PKG_VERSION"));

/// Why a client could not be built.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Builder for [`HttpThemeClient`].
#[derive(Debug, Clone)]
pub struct HttpThemeClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpThemeClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Total time allowed per request, connect included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the base URL and build the client.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidBaseUrl`] unless the URL parses with an
    /// `http` or `https` scheme, or [`ClientError::Build`] if reqwest cannot
    /// initialize.
    pub fn build(self) -> Result<HttpThemeClient, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let parsed = Url::parse(self.base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()?;

        Ok(HttpThemeClient {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            timeout: self.timeout,
            client,
        })
    }
}

/// Talks to a theme generation service over HTTP.
///
/// `POST {base}/api/generate-theme` answers with the raw theme payload and
/// `POST {base}/api/generate-logo` with a [`LogoResponse`]. Error statuses
/// carry an [`ErrorBody`].
#[derive(Debug, Clone)]
pub struct HttpThemeClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpThemeClient {
    /// A client with the default timeout.
    ///
    /// # Errors
    /// See [`HttpThemeClientBuilder::build`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        HttpThemeClientBuilder::new(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> HttpThemeClientBuilder {
        HttpThemeClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> Result<Value, GenerateError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(path);
        debug!(http.url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            let err = upstream_error(status, &text);
            warn!(http.url = %url, http.status = status.as_u16(), error = %err, "Generator returned an error");
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| {
            GenerateError::InvalidResponse(format!("Response was not valid JSON: {e}"))
        })
    }

    fn transport_error(&self, err: &reqwest::Error) -> GenerateError {
        if err.is_timeout() {
            GenerateError::Transport(format!(
                "Request timeout after {}s",
                self.timeout.as_secs_f64()
            ))
        } else {
            GenerateError::Transport(format!("Network error: {err}"))
        }
    }
}

/// Turn an error status and body into a [`GenerateError`].
///
/// The body's `error` field is preferred, then `details`, then the status
/// reason.
fn upstream_error(status: StatusCode, body: &str) -> GenerateError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = [Some(parsed.error), parsed.details]
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Generation failed")
                .to_string()
        });
    GenerateError::upstream(status.as_u16(), message)
}

#[async_trait]
impl ThemeGenerator for HttpThemeClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GenerateError> {
        info!(generation.mode = %request.mode, generation.seed = request.seed, "Requesting theme");
        self.post_json(THEME_PATH, request).await
    }
}

#[async_trait]
impl LogoGenerator for HttpThemeClient {
    async fn generate_logo(&self, request: &LogoRequest) -> Result<LogoResponse, GenerateError> {
        info!(logo.theme = %request.theme_name, "Requesting logo");
        let value = self.post_json(LOGO_PATH, request).await?;
        let response: LogoResponse = serde_json::from_value(value).map_err(|e| {
            GenerateError::InvalidResponse(format!("Invalid logo response: {e}"))
        })?;
        if response.logo_url.is_empty() {
            return Err(GenerateError::InvalidResponse(
                "No logo URL returned".to_string(),
            ));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use themer::UpstreamCategory;

    #[test]
    fn test_builder_rejects_bad_urls() {
        assert!(matches!(
            HttpThemeClient::new("not a url"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpThemeClient::new("ftp://example.com"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = HttpThemeClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.endpoint(THEME_PATH), "http://localhost:3000/api/generate-theme");
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_upstream_error_prefers_error_field() {
        let err = upstream_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Content flagged as sensitive","details":"E005"}"#,
        );
        assert_eq!(err.to_string(), "Content flagged as sensitive");
        assert_eq!(err.category(), Some(UpstreamCategory::SensitiveContent));
    }

    #[test]
    fn test_upstream_error_falls_back() {
        let err = upstream_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "Bad Gateway");
        assert_eq!(err.category(), Some(UpstreamCategory::Network));

        let err = upstream_error(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"","details":"boom"}"#);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = upstream_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"OpenAI API key not configured. Please add OPENAI_API_KEY."}"#,
        );
        assert!(matches!(err, GenerateError::Configuration(_)));
    }
}
