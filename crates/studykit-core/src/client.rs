//! The orchestrating client tying resolver, gate and normalizer together.
//!
//! [`StudyClient`] is **generic over the backend type `B`**, mirroring how a
//! route handler owns one concrete provider for the process lifetime. Every
//! feature operation is the same three-step pipeline — build prompt, dispatch,
//! normalize — so features differ only in wording and target shape.
//!
//! Error policy at this boundary:
//!
//! * [`GenerateError::InvalidInput`] is the *only* `Err` a caller can see;
//!   it is raised before any remote call happens.
//! * Every remote-originated failure is absorbed into
//!   `Ok(GenerationResult::Degraded(..))` so callers always receive a
//!   well-formed response object.

use std::sync::Arc;

use studykit_prompt::build_prompt;
use studykit_types::{
    Complexity, DegradedResult, FeatureOptions, GenerationRequest, GenerationResult, SummaryKind,
    SummaryMode,
};
use tracing::{debug, warn};

use crate::dispatch::{DispatchConfig, DispatchGate};
use crate::error::{GenerateError, Result};
use crate::normalize::normalize;
use crate::provider::GenerativeProvider;
use crate::resolver::{ModelResolver, ResolverConfig};

/// Largest quiz a single request may ask for.
const MAX_QUIZ_QUESTIONS: u32 = 20;

/// A client bound to a single generation backend.
///
/// Cheap to share: wrap it in an `Arc` (or clone the inner `Arc<B>` via
/// `new`) and hand it to every request handler. The resolver cache is the
/// only shared mutable state and is safe under concurrent use.
pub struct StudyClient<B> {
    backend: Arc<B>,
    resolver: ModelResolver,
    gate: DispatchGate,
}

impl<B> StudyClient<B>
where
    B: GenerativeProvider + 'static,
{
    /// Create a client with default resolver and dispatch configuration.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            resolver: ModelResolver::default(),
            gate: DispatchGate::default(),
        }
    }

    /// Replace the static model candidate list.
    pub fn with_resolver_config(mut self, config: ResolverConfig) -> Self {
        self.resolver = ModelResolver::new(config);
        self
    }

    /// Replace the timeout/backoff policy.
    pub fn with_dispatch_config(mut self, config: DispatchConfig) -> Self {
        self.gate = DispatchGate::new(config);
        self
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one generation request end to end.
    ///
    /// # Errors
    ///
    /// Only [`GenerateError::InvalidInput`]; see the module docs.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult> {
        validate(&request)?;
        Ok(self.run(request).await)
    }

    /// Summarize study material.
    pub async fn summarize(
        &self,
        text: impl Into<String>,
        max_words: u32,
        kind: SummaryKind,
        mode: SummaryMode,
    ) -> Result<GenerationResult> {
        self.generate(GenerationRequest::new(
            text,
            FeatureOptions::Summarize {
                max_words,
                kind,
                mode,
            },
        ))
        .await
    }

    /// Explain a topic at the requested complexity level.
    pub async fn simplify(
        &self,
        topic: impl Into<String>,
        complexity: Complexity,
    ) -> Result<GenerationResult> {
        self.generate(GenerationRequest::new(
            topic,
            FeatureOptions::Simplify { complexity },
        ))
        .await
    }

    /// Generate a multiple-choice quiz from study material.
    pub async fn quiz(
        &self,
        text: impl Into<String>,
        num_questions: u32,
    ) -> Result<GenerationResult> {
        self.generate(GenerationRequest::new(
            text,
            FeatureOptions::Quiz { num_questions },
        ))
        .await
    }

    /// Build a mind map for a topic, optionally seeded with subtopics.
    pub async fn mind_map(
        &self,
        topic: impl Into<String>,
        subtopics: Vec<String>,
    ) -> Result<GenerationResult> {
        self.generate(GenerationRequest::new(
            topic,
            FeatureOptions::MindMap { subtopics },
        ))
        .await
    }

    /// Extract structured research notes from source text.
    pub async fn research(&self, text: impl Into<String>) -> Result<GenerationResult> {
        self.generate(GenerationRequest::new(text, FeatureOptions::Research))
            .await
    }

    /// Clean a voice transcript into readable text plus bullet notes.
    pub async fn voice_clean(&self, speech_text: impl Into<String>) -> Result<GenerationResult> {
        self.generate(GenerationRequest::new(speech_text, FeatureOptions::VoiceClean))
            .await
    }

    async fn run(&self, request: GenerationRequest) -> GenerationResult {
        let kind = request.kind();
        let prompt = build_prompt(&request);

        let raw = match self.call_remote(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%kind, error = %err, "generation degraded");
                return GenerationResult::Degraded(DegradedResult::new(
                    kind,
                    err.degrade_reason(),
                    err.to_string(),
                ));
            }
        };

        debug!(%kind, bytes = raw.len(), "raw model output received");
        normalize(&raw, &request)
    }

    /// Resolve, dispatch with the single-retry policy, and handle a cached
    /// model being rejected by invalidating and re-resolving exactly once.
    async fn call_remote(&self, prompt: &str) -> Result<String> {
        let resolved = self.resolver.resolve(self.backend.as_ref()).await?;

        match self
            .gate
            .dispatch_with_retry(&self.backend, &resolved, prompt)
            .await
        {
            Err(GenerateError::ModelRejected(id)) => {
                warn!(model = %id, "cached model rejected, re-resolving");
                self.resolver.invalidate(&resolved);
                let fresh = self.resolver.resolve(self.backend.as_ref()).await?;
                // The transient-retry budget was already spent on this
                // request; the fresh model gets a single plain dispatch.
                self.gate
                    .dispatch(&self.backend, &fresh, prompt)
                    .await
                    .map_err(|err| match err {
                        GenerateError::ModelRejected(_) => GenerateError::ModelUnavailable,
                        other => other,
                    })
            }
            other => other,
        }
    }
}

fn validate(request: &GenerationRequest) -> Result<()> {
    if request.input.trim().is_empty() {
        return Err(GenerateError::InvalidInput(
            "input text cannot be empty".into(),
        ));
    }

    match &request.feature {
        FeatureOptions::Quiz { num_questions } => {
            if *num_questions == 0 || *num_questions > MAX_QUIZ_QUESTIONS {
                return Err(GenerateError::InvalidInput(format!(
                    "num_questions must be between 1 and {MAX_QUIZ_QUESTIONS}"
                )));
            }
        }
        FeatureOptions::Summarize { max_words, .. } => {
            if *max_words == 0 {
                return Err(GenerateError::InvalidInput(
                    "max_words must be at least 1".into(),
                ));
            }
        }
        _ => {}
    }

    Ok(())
}
