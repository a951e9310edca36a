use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Which conversion algorithm handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Local rule pipeline.
    #[default]
    Deterministic,
    /// Remote text-generation service.
    Generative,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Deterministic => write!(f, "deterministic"),
            Strategy::Generative => write!(f, "generative"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deterministic" | "heuristic" | "regex" => Ok(Strategy::Deterministic),
            "generative" | "ai" | "llm" => Ok(Strategy::Generative),
            other => Err(format!("unknown strategy '{}' (expected 'deterministic' or 'generative')", other)),
        }
    }
}

/// A single conversion job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub source_text: String,
    #[serde(default)]
    pub strategy: Strategy,
    /// Model to ask for; only read by the generative strategy.
    #[serde(default)]
    pub model: Option<String>,
    /// Upper bound on the generative round trip. Falls back to the engine default.
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl ConversionRequest {
    pub fn deterministic(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            strategy: Strategy::Deterministic,
            model: None,
            timeout: None,
        }
    }

    pub fn generative(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            strategy: Strategy::Generative,
            model: None,
            timeout: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionOutput {
    pub output_text: String,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Empty source text.
    MissingInput,
    /// The generative service could not be reached (or did not answer in time).
    BackendUnavailable,
    /// The generative service answered with an error.
    BackendError,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::MissingInput => write!(f, "missing_input"),
            FailureKind::BackendUnavailable => write!(f, "backend_unavailable"),
            FailureKind::BackendError => write!(f, "backend_error"),
        }
    }
}

/// Typed failure returned across the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct ConversionFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ConversionFailure {
    pub fn missing_input() -> Self {
        Self {
            kind: FailureKind::MissingInput,
            message: "Missing code: source text is empty".to_string(),
        }
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::BackendUnavailable,
            message: message.into(),
        }
    }

    pub fn backend_error(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::BackendError,
            message: message.into(),
        }
    }
}

pub type ConversionResult = Result<ConversionOutput, ConversionFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("deterministic".parse::<Strategy>().unwrap(), Strategy::Deterministic);
        assert_eq!("AI".parse::<Strategy>().unwrap(), Strategy::Generative);
        assert!("magic".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let req: ConversionRequest = serde_json::from_str(r#"{"source_text": "x"}"#).unwrap();
        assert_eq!(req.strategy, Strategy::Deterministic);
        assert!(req.model.is_none());
        assert!(req.timeout.is_none());
    }

    #[test]
    fn test_failure_display() {
        let failure = ConversionFailure::backend_error("model not found");
        assert_eq!(failure.to_string(), "backend_error: model not found");
    }
}
