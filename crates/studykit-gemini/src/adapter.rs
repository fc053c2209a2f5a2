use std::env;

use studykit_core::{GenerateError, Result};

use crate::client::GeminiClient;

/// Thin wrapper that wires the HTTP client [`GeminiClient`] into a value
/// implementing [`studykit_core::GenerativeProvider`].
///
/// * stores the API key and optionally a custom base URL,
/// * owns a shareable, connection-pooled `reqwest::Client`,
/// * provides a fluent [`GeminiAdapterBuilder`] so callers don't have to
///   juggle `Option<String>` manually.
///
/// The type itself purposefully exposes **no additional methods** — all
/// user-facing functionality sits on [`studykit_core::StudyClient`] once the
/// adapter is plugged in.
pub struct GeminiAdapter {
    pub(crate) client: GeminiClient,
}

/// Builder for [`GeminiAdapter`].
///
/// # Typical usage
///
/// ```rust,no_run
/// use studykit_gemini::GeminiAdapterBuilder;
///
/// let backend = GeminiAdapterBuilder::new_from_env()
///     .build()
///     .expect("GEMINI_API_KEY must be set");
/// ```
#[derive(Default)]
pub struct GeminiAdapterBuilder {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
}

impl GeminiAdapterBuilder {
    /// Create an *empty* builder. Remember to supply an API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that tries to load the `GEMINI_API_KEY`
    /// environment variable. Missing keys only surface during
    /// [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").ok(),
            base_url: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the adapter at a non-default endpoint (proxy, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Finalise the builder and return a ready-to-use adapter.
    ///
    /// # Errors
    ///
    /// * [`GenerateError::InvalidInput`] – if the API key is missing.
    pub fn build(self) -> Result<GeminiAdapter> {
        let api_key = self.api_key.ok_or(GenerateError::InvalidInput(
            "missing env variable: `GEMINI_API_KEY`".into(),
        ))?;

        Ok(GeminiAdapter {
            client: GeminiClient::with_http(
                api_key,
                reqwest::Client::builder()
                    .timeout(std::time::Duration::from_secs(30))
                    .build()
                    .expect("building reqwest client"),
                self.base_url,
            ),
        })
    }
}
