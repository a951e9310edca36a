//! Prompt Builder
//!
//! Serializes the mapping table's intent into a single instruction blob for
//! the generative strategy. No rewriting happens here.

use super::mapping::MAPPING_TABLE;

const PREAMBLE: &str = "You are an expert QA Automation Engineer. \
Your task is to convert the following Selenium Java code into Playwright TypeScript code.";

/// Output-format constraint; always first in the rule list.
pub const CODE_ONLY: &str = "OUTPUT ONLY THE CODE. No markdown, no explanations.";

const STRUCTURE: &str =
    "Use Page Object Model if the input suggests it, otherwise use a simple test structure.";
const UNMAPPED: &str =
    "Leave constructs you cannot map unchanged rather than inventing an equivalent.";

/// A fully assembled prompt. Built per request and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerativePrompt {
    pub preamble: &'static str,
    pub constraints: Vec<String>,
    pub source_text: String,
}

impl GenerativePrompt {
    pub fn build(source_text: &str) -> Self {
        let mut constraints = vec![CODE_ONLY.to_string(), STRUCTURE.to_string()];
        constraints.extend(
            MAPPING_TABLE
                .iter()
                .filter_map(|entry| entry.guidance)
                .map(str::to_string),
        );
        constraints.push(UNMAPPED.to_string());

        Self {
            preamble: PREAMBLE,
            constraints,
            source_text: source_text.to_string(),
        }
    }

    pub fn render(&self) -> String {
        let rules = self
            .constraints
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}", i + 1, c))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nRULES:\n{}\n\nINPUT CODE:\n{}\n\nOUTPUT CODE:\n",
            self.preamble, rules, self.source_text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_mirror_mapping_guidance() {
        let prompt = GenerativePrompt::build("x");
        assert_eq!(prompt.constraints[0], CODE_ONLY);
        for entry in MAPPING_TABLE {
            if let Some(guidance) = entry.guidance {
                assert!(prompt.constraints.iter().any(|c| c == guidance), "missing {}", entry.name);
            }
        }
    }

    #[test]
    fn test_render_embeds_source_verbatim() {
        let source = "driver.get(\"https://example.com\");\n  Thread.sleep(500);";
        let rendered = GenerativePrompt::build(source).render();
        assert!(rendered.starts_with(PREAMBLE));
        assert!(rendered.contains("1. OUTPUT ONLY THE CODE."));
        assert!(rendered.contains(&format!("INPUT CODE:\n{}\n", source)));
        assert!(rendered.trim_end().ends_with("OUTPUT CODE:"));
    }
}
