use std::time::Duration;

use reqwest::{
    Client as HttpClient,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::debug;

use crate::{
    api_v1beta::{
        GenerateContentRequest, GenerateContentResponse, ListModelsResponse, ModelInfo,
    },
    error::GeminiError,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key, per the Generative Language API docs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Minimal HTTP client for the Generative Language API.
///
/// * Non-streaming only (one request ▶ one response).
/// * Accepts and returns the `api_v1beta` request / response structs defined
///   in this crate.
/// * Shares a single `reqwest::Client`, so cloning `GeminiClient` is cheap.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: HttpClient,
    base: String,
}

impl GeminiClient {
    /// Convenience constructor building a default `reqwest` client:
    /// 30 s timeout, Rustls TLS.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("building reqwest client");

        Self::with_http(api_key, http, None)
    }

    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(
        api_key: impl Into<String>,
        http: HttpClient,
        base_url: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            http,
            base: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }

    fn headers(&self) -> Result<HeaderMap, GeminiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&self.api_key)
                .map_err(|_| GeminiError::Format("API key contains invalid characters".into()))?,
        );
        Ok(headers)
    }

    /// Fetch every model visible to the current credentials.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GeminiError> {
        let url = format!("{}/models", self.base);
        let resp = self
            .http
            .get(url)
            .headers(self.headers()?)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: ListModelsResponse = serde_json::from_slice(&bytes)?;
        debug!(count = parsed.models.len(), "models listed");
        Ok(parsed.models)
    }

    /// Perform one **non-streaming** content generation against `model_id`
    /// and return the raw model text.
    pub async fn generate_content(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> Result<String, GeminiError> {
        let url = format!("{}/models/{model_id}:generateContent", self.base);
        let request = GenerateContentRequest::from_prompt(prompt);

        let resp = self
            .http
            .post(url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;

        parsed.first_text().ok_or_else(|| {
            let reason = parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("no candidates");
            GeminiError::Format(format!("response carries no text ({reason})"))
        })
    }
}
