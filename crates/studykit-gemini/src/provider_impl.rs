use async_trait::async_trait;
use studykit_core::{DiscoveredModel, GenerativeProvider, Result};
use tracing::debug;

use crate::GeminiAdapter;

#[async_trait]
impl GenerativeProvider for GeminiAdapter {
    async fn list_models(&self) -> Result<Vec<DiscoveredModel>> {
        let models = self
            .client
            .list_models()
            .await
            .map_err(|err| err.into_generate_error(None))?;

        // Provider-reported order is relevance-ranked; preserve it.
        Ok(models
            .iter()
            .map(|model| DiscoveredModel {
                id: model.id().to_owned(),
                supports_generation: model.supports_generation(),
            })
            .collect())
    }

    async fn generate(&self, model_id: &str, prompt: &str) -> Result<String> {
        debug!(model = model_id, prompt_bytes = prompt.len(), "generateContent call");
        self.client
            .generate_content(model_id, prompt)
            .await
            .map_err(|err| err.into_generate_error(Some(model_id)))
    }
}
