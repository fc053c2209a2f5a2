//! The seam between orchestration and a concrete remote generation API.
//!
//! A **backend** turns a prompt into a network call against one provider
//! (Gemini, a self-hosted endpoint, a test double) and hands back the raw
//! model text. The trait is intentionally minimal:
//!
//! * `list_models` – the discovery call: every model identifier usable with
//!   the current credentials, with a flag for content-generation support.
//! * `generate` – one non-streaming generation round-trip returning opaque
//!   text. Parsing is *not* the backend's job; that belongs to the
//!   normalizer.
//!
//! Errors must already be mapped into the [`crate::error::GenerateError`]
//! taxonomy when they cross this boundary.

use async_trait::async_trait;

use crate::error::Result;

/// One model identifier reported by the discovery call.
///
/// Provider-reported order is treated as relevance-ranked, so backends must
/// preserve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModel {
    pub id: String,
    /// Whether the provider lists content generation among the model's
    /// supported methods.
    pub supports_generation: bool,
}

/// A remote generation API, as seen by the resolver and the dispatch gate.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// List all model identifiers available to the current credentials.
    async fn list_models(&self) -> Result<Vec<DiscoveredModel>>;

    /// Execute one generation call against `model_id` and return the raw,
    /// unparsed model text.
    async fn generate(&self, model_id: &str, prompt: &str) -> Result<String>;
}
