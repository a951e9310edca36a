//! Selenium → Playwright conversion
//!
//! Converts Selenium (Java) browser-automation code into Playwright
//! (TypeScript) with either:
//! - a deterministic, ordered regex rule pipeline
//! - a generative backend (a local Ollama chat endpoint)
//!
//! Both sit behind [`ConversionEngine`], which callers select between with
//! a [`Strategy`] tag.

pub mod config;
pub mod conversion;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use config::EngineConfig;
pub use conversion::{
    ConversionEngine, ConversionFailure, ConversionOutput, ConversionRequest, FailureKind, RulePipeline, Strategy,
};
pub use store::OutputStore;
