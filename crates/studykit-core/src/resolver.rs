//! Model discovery and selection.
//!
//! Resolution answers one question: *which remote model identifier is usable
//! with the caller's credentials right now?* The answer is cached for the
//! process lifetime and only thrown away when the remote API starts
//! rejecting it.
//!
//! The algorithm, in order:
//!
//! 1. live discovery via [`GenerativeProvider::list_models`], filtered to
//!    models that support content generation; the first hit wins
//!    (provider-reported order is relevance-ranked);
//! 2. on discovery failure or an empty list, walk the static candidate list
//!    in rank order and probe each with a trivial generation call;
//! 3. nothing left → [`GenerateError::ModelUnavailable`].
//!
//! The cache is an atomically swapped `Arc` behind an `RwLock`; concurrent
//! requests may race into duplicate re-resolutions (idempotent, cheap) but
//! can never observe a partially written value.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::{GenerateError, Result};
use crate::provider::GenerativeProvider;

/// Minimal prompt used to probe whether a static candidate accepts calls.
const PROBE_PROMPT: &str = "Reply with the single word: ready";

/// A known model identifier with its fallback priority (lower rank first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidate {
    pub id: String,
    pub rank: u32,
}

impl ModelCandidate {
    pub fn new(id: impl Into<String>, rank: u32) -> Self {
        Self {
            id: id.into(),
            rank,
        }
    }
}

/// The single candidate confirmed usable, cached for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub id: String,
    /// True when the identifier came from live discovery rather than the
    /// static fallback list.
    pub discovered: bool,
}

/// Static fallback configuration.
///
/// The exact identifiers drift as the remote API evolves, so they are
/// configuration rather than code; the default covers the Gemini family.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub candidates: Vec<ModelCandidate>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                ModelCandidate::new("gemini-1.5-flash", 0),
                ModelCandidate::new("gemini-1.5-pro", 1),
                ModelCandidate::new("gemini-2.0-flash-exp", 2),
                ModelCandidate::new("gemini-1.0-pro", 3),
            ],
        }
    }
}

/// Memoizing resolver. Cheap after the first success; safe to share across
/// concurrent requests.
pub struct ModelResolver {
    config: ResolverConfig,
    cache: RwLock<Option<Arc<ResolvedModel>>>,
}

impl ModelResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(None),
        }
    }

    /// The currently cached model, if any. Never triggers resolution.
    pub fn cached(&self) -> Option<Arc<ResolvedModel>> {
        self.cache.read().expect("resolver cache lock poisoned").clone()
    }

    /// Return the cached model or run resolution against `provider`.
    ///
    /// # Errors
    ///
    /// * [`GenerateError::ModelUnavailable`] – discovery and every static
    ///   candidate failed.
    /// * [`GenerateError::AuthFailed`] – a probe hit a credential rejection;
    ///   probing further candidates cannot help.
    pub async fn resolve<B: GenerativeProvider + ?Sized>(
        &self,
        provider: &B,
    ) -> Result<Arc<ResolvedModel>> {
        if let Some(model) = self.cached() {
            return Ok(model);
        }

        let resolved = Arc::new(self.resolve_uncached(provider).await?);
        *self.cache.write().expect("resolver cache lock poisoned") = Some(Arc::clone(&resolved));
        debug!(model = %resolved.id, discovered = resolved.discovered, "model resolved");
        Ok(resolved)
    }

    /// Drop the cached model, but only if it is still `stale`.
    ///
    /// The guard keeps a slow request from clobbering a fresher resolution
    /// that a concurrent request already installed.
    pub fn invalidate(&self, stale: &ResolvedModel) {
        let mut guard = self.cache.write().expect("resolver cache lock poisoned");
        if guard.as_deref().is_some_and(|current| current.id == stale.id) {
            warn!(model = %stale.id, "invalidating rejected model");
            *guard = None;
        }
    }

    async fn resolve_uncached<B: GenerativeProvider + ?Sized>(
        &self,
        provider: &B,
    ) -> Result<ResolvedModel> {
        match provider.list_models().await {
            Ok(models) => {
                if let Some(model) = models.into_iter().find(|m| m.supports_generation) {
                    return Ok(ResolvedModel {
                        id: model.id,
                        discovered: true,
                    });
                }
                warn!("discovery returned no generation-capable models, trying static candidates");
            }
            Err(err) => {
                warn!(error = %err, "model discovery failed, trying static candidates");
            }
        }

        let mut candidates: Vec<&ModelCandidate> = self.config.candidates.iter().collect();
        candidates.sort_by_key(|c| c.rank);

        for candidate in candidates {
            match provider.generate(&candidate.id, PROBE_PROMPT).await {
                Ok(_) => {
                    return Ok(ResolvedModel {
                        id: candidate.id.clone(),
                        discovered: false,
                    });
                }
                Err(GenerateError::AuthFailed) => return Err(GenerateError::AuthFailed),
                Err(err) => {
                    debug!(model = %candidate.id, error = %err, "candidate probe failed");
                }
            }
        }

        Err(GenerateError::ModelUnavailable)
    }
}

impl Default for ModelResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::provider::DiscoveredModel;

    /// Provider whose discovery fails and whose first probe target rejects.
    struct FlakyProvider {
        generate_calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerativeProvider for FlakyProvider {
        async fn list_models(&self) -> Result<Vec<DiscoveredModel>> {
            Err(GenerateError::Unavailable("listing disabled".into()))
        }

        async fn generate(&self, model_id: &str, _prompt: &str) -> Result<String> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            if model_id == "gemini-1.5-flash" {
                Err(GenerateError::ModelRejected(model_id.to_owned()))
            } else {
                Ok("ready".into())
            }
        }
    }

    struct DiscoveringProvider;

    #[async_trait]
    impl GenerativeProvider for DiscoveringProvider {
        async fn list_models(&self) -> Result<Vec<DiscoveredModel>> {
            Ok(vec![
                DiscoveredModel {
                    id: "embedding-001".into(),
                    supports_generation: false,
                },
                DiscoveredModel {
                    id: "gemini-1.5-pro".into(),
                    supports_generation: true,
                },
            ])
        }

        async fn generate(&self, _model_id: &str, _prompt: &str) -> Result<String> {
            Ok("ready".into())
        }
    }

    #[tokio::test]
    async fn discovery_picks_first_generation_capable_model() {
        let resolver = ModelResolver::default();
        let resolved = resolver.resolve(&DiscoveringProvider).await.unwrap();
        assert_eq!(resolved.id, "gemini-1.5-pro");
        assert!(resolved.discovered);
    }

    #[tokio::test]
    async fn fallback_walks_candidates_in_rank_order() {
        let provider = FlakyProvider {
            generate_calls: AtomicUsize::new(0),
        };
        let resolver = ModelResolver::default();
        let resolved = resolver.resolve(&provider).await.unwrap();
        // First candidate rejected, second accepted.
        assert_eq!(resolved.id, "gemini-1.5-pro");
        assert!(!resolved.discovered);
        assert_eq!(provider.generate_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn resolution_is_memoized() {
        let provider = FlakyProvider {
            generate_calls: AtomicUsize::new(0),
        };
        let resolver = ModelResolver::default();
        let first = resolver.resolve(&provider).await.unwrap();
        let second = resolver.resolve(&provider).await.unwrap();
        assert_eq!(first.id, second.id);
        // No additional probes on the second call.
        assert_eq!(provider.generate_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_only_clears_matching_model() {
        let resolver = ModelResolver::default();
        let resolved = resolver.resolve(&DiscoveringProvider).await.unwrap();

        // A stale handle for a different model must not clear the cache.
        resolver.invalidate(&ResolvedModel {
            id: "gemini-1.0-pro".into(),
            discovered: false,
        });
        assert!(resolver.cached().is_some());

        resolver.invalidate(&resolved);
        assert!(resolver.cached().is_none());
    }

    #[tokio::test]
    async fn exhausted_candidates_yield_model_unavailable() {
        struct DeadProvider;

        #[async_trait]
        impl GenerativeProvider for DeadProvider {
            async fn list_models(&self) -> Result<Vec<DiscoveredModel>> {
                Ok(vec![])
            }
            async fn generate(&self, model_id: &str, _prompt: &str) -> Result<String> {
                Err(GenerateError::ModelRejected(model_id.to_owned()))
            }
        }

        let resolver = ModelResolver::default();
        let err = resolver.resolve(&DeadProvider).await.unwrap_err();
        assert!(matches!(err, GenerateError::ModelUnavailable));
    }
}
