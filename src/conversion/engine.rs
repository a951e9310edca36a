//! Conversion Engine Facade
//!
//! The only entry point callers use. Validates the request, dispatches on
//! the strategy tag and normalizes both strategies to one result type.
//! There is no fallback from generative to deterministic.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::backend::{GenerativeBackend, OllamaChatBackend};
use super::strategy::{ConversionStrategy, DeterministicStrategy, GenerativeStrategy};
use super::types::{ConversionFailure, ConversionOutput, ConversionRequest, ConversionResult, Strategy};
use crate::config::EngineConfig;

pub struct ConversionEngine {
    deterministic: DeterministicStrategy,
    generative: GenerativeStrategy,
    default_timeout: Duration,
}

impl ConversionEngine {
    pub fn new(generative: GenerativeStrategy, default_timeout: Duration) -> Self {
        Self {
            deterministic: DeterministicStrategy::default(),
            generative,
            default_timeout,
        }
    }

    /// Engine wired to the Ollama chat endpoint named in `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        let backend: Arc<dyn GenerativeBackend> = Arc::new(OllamaChatBackend::new(
            config.ollama_url.clone(),
            config.connect_timeout(),
        ));
        Self::with_backend(backend, config)
    }

    pub fn with_backend(backend: Arc<dyn GenerativeBackend>, config: &EngineConfig) -> Self {
        let generative = GenerativeStrategy::new(backend, config.default_model.clone())
            .with_strip_narration(config.strip_narration);
        Self::new(generative, config.request_timeout())
    }

    pub fn default_model(&self) -> &str {
        self.generative.default_model()
    }

    fn strategy(&self, tag: Strategy) -> &dyn ConversionStrategy {
        match tag {
            Strategy::Deterministic => &self.deterministic,
            Strategy::Generative => &self.generative,
        }
    }

    pub async fn convert(&self, request: &ConversionRequest) -> ConversionResult {
        if request.source_text.trim().is_empty() {
            warn!("Rejecting conversion request with empty source");
            return Err(ConversionFailure::missing_input());
        }

        let strategy = self.strategy(request.strategy);
        info!(
            "Converting {} bytes with {} strategy",
            request.source_text.len(),
            strategy.name()
        );

        let output_text = match request.strategy {
            Strategy::Deterministic => strategy.convert(request).await?,
            Strategy::Generative => {
                let limit = request.timeout.unwrap_or(self.default_timeout);
                match tokio::time::timeout(limit, strategy.convert(request)).await {
                    Ok(result) => result?,
                    Err(_) => {
                        warn!("Generative conversion timed out after {:?}", limit);
                        return Err(ConversionFailure::backend_unavailable(format!(
                            "Generative service at {} did not answer within {:?}",
                            self.generative.backend().endpoint(),
                            limit
                        )));
                    }
                }
            }
        };

        Ok(ConversionOutput {
            output_text,
            strategy: request.strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::FailureKind;
    use async_trait::async_trait;

    struct FixedBackend(Result<String, ConversionFailure>);

    #[async_trait]
    impl GenerativeBackend for FixedBackend {
        fn endpoint(&self) -> &str {
            "mock://fixed"
        }

        async fn complete(&self, _model: &str, _prompt: String) -> Result<String, ConversionFailure> {
            self.0.clone()
        }
    }

    fn engine(reply: Result<String, ConversionFailure>) -> ConversionEngine {
        ConversionEngine::new(
            GenerativeStrategy::new(Arc::new(FixedBackend(reply)), "codellama"),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_empty_source_is_missing_input_for_both_strategies() {
        let engine = engine(Ok("unused".into()));
        for req in [ConversionRequest::deterministic(""), ConversionRequest::generative("  \n")] {
            let err = engine.convert(&req).await.unwrap_err();
            assert_eq!(err.kind, FailureKind::MissingInput);
        }
    }

    #[tokio::test]
    async fn test_backend_error_propagates_without_fallback() {
        let engine = engine(Err(ConversionFailure::backend_error("model 'x' not found")));
        let err = engine
            .convert(&ConversionRequest::generative("Thread.sleep(1);"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::BackendError);
        assert_eq!(err.message, "model 'x' not found");
    }

    #[tokio::test]
    async fn test_output_records_strategy() {
        let engine = engine(Ok("await page.waitForTimeout(1);".into()));

        let det = engine.convert(&ConversionRequest::deterministic("Thread.sleep(1);")).await.unwrap();
        assert_eq!(det.strategy, Strategy::Deterministic);
        assert!(det.output_text.starts_with("import"));

        let generated = engine.convert(&ConversionRequest::generative("Thread.sleep(1);")).await.unwrap();
        assert_eq!(generated.strategy, Strategy::Generative);
        assert_eq!(generated.output_text, "await page.waitForTimeout(1);");
    }
}
