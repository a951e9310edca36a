//! Rule Pipeline
//!
//! Deterministic Selenium → Playwright rewriting. The pipeline is a fold
//! over its ordered rules with the text as accumulator: each rule reads the
//! output of the previous one, so the order of `MAPPING_TABLE` is part of
//! the behaviour (handle renaming must precede navigation, nested
//! `findElement(By.*)` forms must precede the standalone `By.*` forms, ...).
//!
//! `apply` is total. Anything the table does not cover passes through
//! verbatim.

use lazy_static::lazy_static;
use serde::Serialize;
use tracing::debug;

use super::mapping::{MappingEntry, RuleCategory, MAPPING_TABLE};
use super::rule::{MappingRule, RuleDefect};

lazy_static! {
    static ref STANDARD_PIPELINE: RulePipeline =
        RulePipeline::from_table(MAPPING_TABLE).expect("built-in mapping table is well-formed");
}

/// One rule's effect, as reported by [`RulePipeline::trace`].
#[derive(Debug, Clone, Serialize)]
pub struct RuleStep {
    pub rule: &'static str,
    pub category: RuleCategory,
    pub matches: usize,
    pub output: String,
}

/// An immutable, ordered sequence of compiled rules.
#[derive(Debug, Clone)]
pub struct RulePipeline {
    rules: Vec<MappingRule>,
}

impl RulePipeline {
    /// The process-wide pipeline built from the built-in mapping table.
    pub fn standard() -> &'static RulePipeline {
        &STANDARD_PIPELINE
    }

    /// Compile `entries` in order. Fails on the first defective entry or on
    /// an entry whose category belongs to an earlier stage than its
    /// predecessor.
    pub fn from_table(entries: &[MappingEntry]) -> Result<Self, RuleDefect> {
        let mut rules = Vec::with_capacity(entries.len());
        let mut previous: Option<RuleCategory> = None;

        for entry in entries {
            if let Some(prev) = previous {
                if entry.category < prev {
                    return Err(RuleDefect::OutOfOrder {
                        rule: entry.name.to_string(),
                        category: entry.category,
                        previous: prev,
                    });
                }
            }
            previous = Some(entry.category);
            rules.push(MappingRule::compile(entry)?);
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, source: &str) -> String {
        self.rules
            .iter()
            .fold(source.to_string(), |text, rule| rule.apply(&text))
    }

    /// Like [`apply`](Self::apply) but keeps the intermediate text after
    /// every rule.
    pub fn trace(&self, source: &str) -> Vec<RuleStep> {
        let mut steps = Vec::with_capacity(self.rules.len());
        let mut text = source.to_string();

        for rule in &self.rules {
            let matches = rule.match_count(&text);
            if matches > 0 {
                debug!("rule {} ({}) matched {} time(s)", rule.name(), rule.category(), matches);
                text = rule.apply(&text);
            }
            steps.push(RuleStep {
                rule: rule.name(),
                category: rule.category(),
                matches,
                output: text.clone(),
            });
        }

        steps
    }
}
