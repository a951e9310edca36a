//! The two interchangeable ways of turning Selenium text into Playwright text.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::backend::GenerativeBackend;
use super::completion::extract_code;
use super::pipeline::RulePipeline;
use super::prompt::GenerativePrompt;
use super::types::{ConversionFailure, ConversionRequest};

/// Produces target text from legacy text.
#[async_trait]
pub trait ConversionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn convert(&self, request: &ConversionRequest) -> Result<String, ConversionFailure>;
}

/// Local rule pipeline. Never fails.
pub struct DeterministicStrategy {
    pipeline: &'static RulePipeline,
}

impl DeterministicStrategy {
    pub fn new(pipeline: &'static RulePipeline) -> Self {
        Self { pipeline }
    }
}

impl Default for DeterministicStrategy {
    fn default() -> Self {
        Self::new(RulePipeline::standard())
    }
}

#[async_trait]
impl ConversionStrategy for DeterministicStrategy {
    fn name(&self) -> &'static str {
        "deterministic"
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<String, ConversionFailure> {
        Ok(self.pipeline.apply(&request.source_text))
    }
}

/// Prompt builder + generative backend.
pub struct GenerativeStrategy {
    backend: Arc<dyn GenerativeBackend>,
    default_model: String,
    strip_narration: bool,
}

impl GenerativeStrategy {
    pub fn new(backend: Arc<dyn GenerativeBackend>, default_model: impl Into<String>) -> Self {
        Self {
            backend,
            default_model: default_model.into(),
            strip_narration: true,
        }
    }

    pub fn with_strip_narration(mut self, enabled: bool) -> Self {
        self.strip_narration = enabled;
        self
    }

    pub fn backend(&self) -> &Arc<dyn GenerativeBackend> {
        &self.backend
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[async_trait]
impl ConversionStrategy for GenerativeStrategy {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<String, ConversionFailure> {
        let model = request
            .model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.default_model);

        let prompt = GenerativePrompt::build(&request.source_text).render();
        info!("Requesting conversion from {} (model={})", self.backend.endpoint(), model);

        let completion = self.backend.complete(model, prompt).await?;
        debug!("Generative completion: {} bytes", completion.len());

        if self.strip_narration {
            Ok(extract_code(&completion))
        } else {
            Ok(completion)
        }
    }
}
