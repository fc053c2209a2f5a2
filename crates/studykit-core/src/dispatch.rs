//! The dispatch gate: every remote generation call goes through here.
//!
//! Responsibilities:
//!
//! * execute the call on a spawned task so a slow generation never serializes
//!   other in-flight requests behind the caller's context;
//! * enforce a hard timeout on every call — there is no unbounded wait;
//! * offer a single bounded retry with backoff for transient failures
//!   ([`GenerateError::is_retryable`]); the bound is exactly one retry per
//!   request so a struggling remote API is not amplified against.
//!
//! On timeout the spawned task is aborted rather than awaited to completion;
//! the remote provider may still finish processing on its side, which is
//! acceptable.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{GenerateError, Result};
use crate::provider::GenerativeProvider;
use crate::resolver::ResolvedModel;

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Deadline for one remote call, including connection setup.
    pub timeout: Duration,
    /// Sleep before the single allowed retry.
    pub retry_backoff: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Stateless wrapper around the timeout/retry policy.
pub struct DispatchGate {
    config: DispatchConfig,
}

impl DispatchGate {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Issue one generation call off the caller's context.
    pub async fn dispatch<B>(
        &self,
        provider: &Arc<B>,
        model: &ResolvedModel,
        prompt: &str,
    ) -> Result<String>
    where
        B: GenerativeProvider + 'static,
    {
        let provider = Arc::clone(provider);
        let model_id = model.id.clone();
        let prompt = prompt.to_owned();

        let handle =
            tokio::spawn(async move { provider.generate(&model_id, &prompt).await });
        let abort = handle.abort_handle();

        match tokio::time::timeout(self.config.timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(GenerateError::Unknown(format!(
                "dispatch task failed: {join_err}"
            ))),
            Err(_elapsed) => {
                abort.abort();
                debug!(model = %model.id, timeout = ?self.config.timeout, "dispatch timed out");
                Err(GenerateError::Timeout)
            }
        }
    }

    /// [`Self::dispatch`], retried exactly once with backoff on a transient
    /// failure. `AuthFailed` and model rejections surface immediately.
    pub async fn dispatch_with_retry<B>(
        &self,
        provider: &Arc<B>,
        model: &ResolvedModel,
        prompt: &str,
    ) -> Result<String>
    where
        B: GenerativeProvider + 'static,
    {
        match self.dispatch(provider, model, prompt).await {
            Ok(text) => Ok(text),
            Err(err) if err.is_retryable() => {
                warn!(model = %model.id, error = %err, "transient dispatch failure, retrying once");
                tokio::time::sleep(self.config.retry_backoff).await;
                self.dispatch(provider, model, prompt).await
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for DispatchGate {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}
