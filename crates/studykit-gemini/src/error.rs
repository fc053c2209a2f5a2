use reqwest::StatusCode;
use studykit_core::GenerateError;

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn't deserialize body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Gemini returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Gemini format error: {0}")]
    Format(String),
}

impl GeminiError {
    /// Map into the core taxonomy, with the model identifier on hand so a
    /// 404 can be reported as a rejection of that specific model.
    pub(crate) fn into_generate_error(self, model_id: Option<&str>) -> GenerateError {
        match self {
            GeminiError::Http(err) if err.is_timeout() => GenerateError::Timeout,
            GeminiError::Http(err) => GenerateError::Unavailable(err.to_string()),
            GeminiError::Api { status, body } => match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerateError::AuthFailed,
                // The API reports an invalid key as 400 with this reason.
                StatusCode::BAD_REQUEST if body.contains("API_KEY_INVALID") => {
                    GenerateError::AuthFailed
                }
                StatusCode::TOO_MANY_REQUESTS => GenerateError::RateLimited,
                StatusCode::NOT_FOUND => match model_id {
                    Some(id) => GenerateError::ModelRejected(id.to_owned()),
                    None => GenerateError::Unavailable(body),
                },
                s if s.is_server_error() => GenerateError::Unavailable(body),
                _ => GenerateError::Unknown(format!("status {status}: {body}")),
            },
            GeminiError::Serde(err) => GenerateError::Unknown(err.to_string()),
            GeminiError::Format(msg) => GenerateError::Unknown(msg),
        }
    }
}

impl From<GeminiError> for GenerateError {
    fn from(value: GeminiError) -> Self {
        value.into_generate_error(None)
    }
}
