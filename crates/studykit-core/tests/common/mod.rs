//! Scriptable fake backend shared by the orchestration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use studykit_core::{DiscoveredModel, GenerateError, GenerativeProvider, Result};

/// One scripted outcome for a `generate` call.
#[derive(Debug, Clone)]
pub enum Step {
    Ok(String),
    Transient,
    AuthFail,
    Reject,
}

/// Fake remote API with per-call scripting and call counters.
///
/// `generate` pops the front of the script; when the script is empty it
/// falls back to `default_response`. An optional artificial latency models a
/// slow provider.
pub struct ScriptedProvider {
    pub discovery: Result<Vec<DiscoveredModel>>,
    pub script: Mutex<VecDeque<Step>>,
    pub default_response: String,
    pub latency: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn discovering(default_response: impl Into<String>) -> Self {
        Self {
            discovery: Ok(vec![DiscoveredModel {
                id: "gemini-1.5-flash".into(),
                supports_generation: true,
            }]),
            script: Mutex::new(VecDeque::new()),
            default_response: default_response.into(),
            latency: None,
            list_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
        }
    }

    /// Discovery is down; resolution must walk the static candidates.
    pub fn without_discovery(default_response: impl Into<String>) -> Self {
        Self {
            discovery: Err(GenerateError::Unavailable("discovery disabled".into())),
            ..Self::discovering(default_response)
        }
    }

    pub fn with_script(self, steps: impl IntoIterator<Item = Step>) -> Self {
        *self.script.lock().unwrap() = steps.into_iter().collect();
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn generate_count(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedProvider {
    async fn list_models(&self) -> Result<Vec<DiscoveredModel>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match &self.discovery {
            Ok(models) => Ok(models.clone()),
            Err(_) => Err(GenerateError::Unavailable("discovery disabled".into())),
        }
    }

    async fn generate(&self, model_id: &str, _prompt: &str) -> Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let step = self.script.lock().unwrap().pop_front();
        match step {
            None => Ok(self.default_response.clone()),
            Some(Step::Ok(body)) => Ok(body),
            Some(Step::Transient) => Err(GenerateError::Unavailable("connection reset".into())),
            Some(Step::AuthFail) => Err(GenerateError::AuthFailed),
            Some(Step::Reject) => Err(GenerateError::ModelRejected(model_id.to_owned())),
        }
    }
}
