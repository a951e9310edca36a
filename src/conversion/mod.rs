//! Conversion Engine
//!
//! Turns Selenium (Java) browser-automation code into Playwright
//! (TypeScript) code, either with the deterministic rule pipeline or by
//! asking a local text-generation service.
//!
//! - `mapping`: the legacy → target catalogue
//! - `pipeline`: ordered regex rewrites built from the catalogue
//! - `prompt` / `backend`: the generative strategy
//! - `engine`: the facade callers talk to

pub mod backend;
pub mod completion;
pub mod engine;
pub mod mapping;
pub mod pipeline;
pub mod prompt;
pub mod rule;
pub mod strategy;
mod types;

pub use backend::{GenerativeBackend, OllamaChatBackend};
pub use engine::ConversionEngine;
pub use mapping::{MappingEntry, RuleCategory, MAPPING_TABLE};
pub use pipeline::{RulePipeline, RuleStep};
pub use prompt::GenerativePrompt;
pub use rule::{MappingRule, RuleDefect};
pub use strategy::{ConversionStrategy, DeterministicStrategy, GenerativeStrategy};
pub use types::{
    ConversionFailure, ConversionOutput, ConversionRequest, ConversionResult, FailureKind, Strategy,
};
