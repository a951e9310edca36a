//! Completion clean-up for the generative strategy.
//!
//! Models asked for "code only" still wrap answers in fences or open with a
//! sentence of narration. This pulls the code back out. Anything that does
//! not look like narration is kept.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n(?P<code>.*?)\r?\n?```").unwrap();
    static ref NARRATION_LINE: Regex = Regex::new(
        r"(?i)^\s*(here\s+is|here's|below\s+is|sure[,!.]|certainly[,!.]|this\s+(code|is\s+the)|the\s+(converted|following)|i\s+(have|'ve)\s+converted|note:)"
    )
    .unwrap();
}

/// Extract the code portion of a model completion.
///
/// Every fenced block is kept, in order, separated by a blank line. Without
/// fences, leading and trailing narration lines are dropped.
pub fn extract_code(completion: &str) -> String {
    let blocks: Vec<&str> = FENCED_BLOCK
        .captures_iter(completion)
        .filter_map(|caps| caps.name("code"))
        .map(|m| m.as_str().trim_end())
        .collect();
    if !blocks.is_empty() {
        return blocks.join("\n\n");
    }

    let lines: Vec<&str> = completion.lines().collect();
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty() && !NARRATION_LINE.is_match(l))
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty() && !NARRATION_LINE.is_match(l))
        .map(|i| i + 1)
        .unwrap_or(start);

    if start >= end {
        return completion.trim().to_string();
    }
    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block_is_extracted() {
        let raw = "Here is the converted code:\n```typescript\nawait page.goto('/');\n```\nLet me know!";
        assert_eq!(extract_code(raw), "await page.goto('/');");
    }

    #[test]
    fn test_every_fenced_block_is_kept() {
        let raw = "Here is the page object:\n```ts\nexport class LoginPage {}\n```\nAnd the test:\n```ts\ntest('login', async ({ page }) => {});\n```";
        assert_eq!(
            extract_code(raw),
            "export class LoginPage {}\n\ntest('login', async ({ page }) => {});"
        );
    }

    #[test]
    fn test_unlabelled_fence() {
        let raw = "```\nconst a = 1;\nconst b = 2;\n```";
        assert_eq!(extract_code(raw), "const a = 1;\nconst b = 2;");
    }

    #[test]
    fn test_leading_narration_is_dropped() {
        let raw = "Sure! Here's the Playwright version.\n\nimport { test } from '@playwright/test';\ntest('x', async () => {});";
        assert_eq!(
            extract_code(raw),
            "import { test } from '@playwright/test';\ntest('x', async () => {});"
        );
    }

    #[test]
    fn test_plain_code_is_untouched() {
        let raw = "await page.fill('#user', 'x');";
        assert_eq!(extract_code(raw), raw);
    }

    #[test]
    fn test_all_narration_falls_back_to_raw() {
        let raw = "Sure, I can help with that.";
        assert_eq!(extract_code(raw), raw);
    }
}
