//! Unified error type exposed by **`studykit-core`**.
//!
//! Backend crates convert their transport errors into one of these variants
//! before bubbling them up, so the orchestration layer reasons about a closed
//! taxonomy instead of provider-specific failure zoo. Only
//! [`GenerateError::InvalidInput`] ever reaches a caller as an `Err`; every
//! remote-originated variant is absorbed into a
//! [`studykit_types::DegradedResult`] by the client.

use studykit_types::DegradeReason;
use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Caller-supplied request failed basic validation. Rejected immediately,
    /// never retried, never degraded.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Resolution exhausted both the discovered and the static candidate
    /// lists without finding a usable model.
    #[error("no usable generation model could be resolved")]
    ModelUnavailable,

    /// The dispatch deadline elapsed before the remote call returned.
    #[error("generation call timed out")]
    Timeout,

    /// The remote API reported a rate limit or exhausted quota.
    #[error("remote API rate limit or quota exceeded")]
    RateLimited,

    /// The remote API rejected the credentials. Non-retryable.
    #[error("remote API rejected the supplied credentials")]
    AuthFailed,

    /// Transport-level failure reaching the remote API.
    #[error("remote API unavailable: {0}")]
    Unavailable(String),

    /// Every normalization tier was exhausted without recovering a field.
    #[error("model output could not be parsed into the requested shape")]
    UnparsableOutput,

    /// The remote API rejected a specific model identifier (revoked or
    /// deprecated). Triggers one cache invalidation and re-resolution.
    #[error("remote API rejected model `{0}`")]
    ModelRejected(String),

    /// Anything the backend could not classify.
    #[error("unexpected backend failure: {0}")]
    Unknown(String),
}

impl GenerateError {
    /// Whether the caller may retry once with backoff before degrading.
    ///
    /// `AuthFailed` is deliberately excluded: a second attempt with the same
    /// credentials cannot succeed and only consumes the remote quota.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerateError::Timeout | GenerateError::RateLimited | GenerateError::Unavailable(_)
        )
    }

    /// Map a remote-originated failure onto the reason carried by a degraded
    /// result. `ModelRejected` degrades as `ModelUnavailable` because by the
    /// time it surfaces, re-resolution has already been attempted.
    pub fn degrade_reason(&self) -> DegradeReason {
        match self {
            GenerateError::ModelUnavailable | GenerateError::ModelRejected(_) => {
                DegradeReason::ModelUnavailable
            }
            GenerateError::Timeout => DegradeReason::Timeout,
            GenerateError::RateLimited => DegradeReason::RateLimited,
            GenerateError::AuthFailed => DegradeReason::AuthFailed,
            GenerateError::Unavailable(_) => DegradeReason::Unavailable,
            GenerateError::UnparsableOutput => DegradeReason::UnparsableOutput,
            GenerateError::InvalidInput(_) | GenerateError::Unknown(_) => DegradeReason::Unknown,
        }
    }
}
