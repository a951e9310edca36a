//! Mapping Table
//!
//! The static catalogue of Selenium (Java) → Playwright (TypeScript)
//! correspondences. Entries are listed in pipeline order: the rule pipeline
//! compiles them front to back and each rule sees the text produced by the
//! ones before it.
//!
//! Every entry names the capture groups that are threaded through unchanged
//! from the legacy construct into the target construct. `pattern` and
//! `replacement` must agree on that set; `RulePipeline::from_table` rejects
//! an entry that does not.

use serde::Serialize;

/// Import line injected at the top of every deterministic conversion.
pub const PLAYWRIGHT_IMPORT: &str = "import { test, expect } from '@playwright/test';";

/// Rule categories, in the order the pipeline applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Import,
    ClassMember,
    Locator,
    Action,
    Navigation,
    Assertion,
    Wait,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 7] = [
        RuleCategory::Import,
        RuleCategory::ClassMember,
        RuleCategory::Locator,
        RuleCategory::Action,
        RuleCategory::Navigation,
        RuleCategory::Assertion,
        RuleCategory::Wait,
    ];
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleCategory::Import => write!(f, "Import"),
            RuleCategory::ClassMember => write!(f, "ClassMember"),
            RuleCategory::Locator => write!(f, "Locator"),
            RuleCategory::Action => write!(f, "Action"),
            RuleCategory::Navigation => write!(f, "Navigation"),
            RuleCategory::Assertion => write!(f, "Assertion"),
            RuleCategory::Wait => write!(f, "Wait"),
        }
    }
}

/// One legacy → target correspondence.
#[derive(Debug, Clone, Copy)]
pub struct MappingEntry {
    /// Stable identifier, used in logs and traces.
    pub name: &'static str,
    pub category: RuleCategory,
    /// Legacy construct as a reader would write it.
    pub legacy: &'static str,
    /// Target construct as a reader would write it.
    pub target: &'static str,
    /// Regex matched against the accumulated text (`regex` crate syntax).
    pub pattern: &'static str,
    /// Replacement template; `${name}` references a capture group.
    pub replacement: &'static str,
    /// Capture groups carried from `pattern` into `replacement`.
    pub captures: &'static [&'static str],
    /// Natural-language form of this rule for the generative prompt.
    /// `None` keeps the entry out of the prompt (mechanical clean-up rules).
    pub guidance: Option<&'static str>,
}

pub static MAPPING_TABLE: &[MappingEntry] = &[
    // ── Header normalization ────────────────────────────────────────────
    MappingEntry {
        name: "inject_playwright_import",
        category: RuleCategory::Import,
        legacy: "<start of file>",
        target: PLAYWRIGHT_IMPORT,
        // Matches the start of input together with an already-injected
        // header, so a second pass leaves exactly one import line.
        pattern: r"\A(?:import \{ test, expect \} from '@playwright/test';\r?\n(?:\r?\n)?)?",
        replacement: "import { test, expect } from '@playwright/test';\n\n",
        captures: &[],
        guidance: Some("Import `test` and `expect` from '@playwright/test'."),
    },
    MappingEntry {
        name: "strip_package_declaration",
        category: RuleCategory::Import,
        legacy: "package com.example.tests;",
        target: "",
        pattern: r"(?m)^[ \t]*package[ \t]+[\w.]+[ \t]*;[ \t]*(?:\r?\n|\z)",
        replacement: "",
        captures: &[],
        guidance: Some("Drop Java `package` declarations."),
    },
    MappingEntry {
        name: "strip_java_imports",
        category: RuleCategory::Import,
        legacy: "import org.openqa.selenium.WebDriver;",
        target: "",
        pattern: r"(?m)^[ \t]*import[ \t]+(?:static[ \t]+)?[\w.]+(?:\.\*)?[ \t]*;[ \t]*(?:\r?\n|\z)",
        replacement: "",
        captures: &[],
        guidance: Some("Drop Java `import` statements; Playwright needs none besides its own."),
    },
    // ── Handle rewrite ──────────────────────────────────────────────────
    MappingEntry {
        name: "driver_declaration",
        category: RuleCategory::ClassMember,
        legacy: "WebDriver driver",
        target: "const page",
        pattern: r"\b(?:WebDriver|ChromeDriver|FirefoxDriver|EdgeDriver|SafariDriver|RemoteWebDriver)[ \t]+driver\b",
        replacement: "const page",
        captures: &[],
        guidance: Some("Replace the `WebDriver driver` handle with the Playwright `page` fixture."),
    },
    MappingEntry {
        name: "driver_member_reference",
        category: RuleCategory::ClassMember,
        legacy: "driver.",
        target: "page.",
        pattern: r"\bdriver\.",
        replacement: "page.",
        captures: &[],
        guidance: None,
    },
    // ── Locators: nested find-element forms first ───────────────────────
    MappingEntry {
        name: "find_by_id",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.id("x"))"#,
        target: r##"locator("#x")"##,
        pattern: r#"\bfindElements?\(\s*By\.id\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r##"locator("#${value}")"##,
        captures: &["value"],
        guidance: Some(r##"Replace `driver.findElement(By.id("x"))` with `page.locator("#x")`."##),
    },
    MappingEntry {
        name: "find_by_css",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.cssSelector("x"))"#,
        target: r#"locator("x")"#,
        pattern: r#"\bfindElements?\(\s*By\.cssSelector\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r#"locator("${value}")"#,
        captures: &["value"],
        guidance: Some(r#"Replace `findElement(By.cssSelector("x"))` with `page.locator("x")`."#),
    },
    MappingEntry {
        name: "find_by_xpath",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.xpath("x"))"#,
        target: r#"locator("xpath=x")"#,
        pattern: r#"\bfindElements?\(\s*By\.xpath\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r#"locator("xpath=${value}")"#,
        captures: &["value"],
        guidance: Some(r#"Replace `By.xpath("x")` with `page.locator("xpath=x")`."#),
    },
    MappingEntry {
        name: "find_by_name",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.name("x"))"#,
        target: r#"locator("[name='x']")"#,
        pattern: r#"\bfindElements?\(\s*By\.name\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r#"locator("[name='${value}']")"#,
        captures: &["value"],
        guidance: Some(r#"Replace `By.name("x")` with `page.locator("[name='x']")`."#),
    },
    MappingEntry {
        name: "find_by_class_name",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.className("x"))"#,
        target: r#"locator(".x")"#,
        pattern: r#"\bfindElements?\(\s*By\.className\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r#"locator(".${value}")"#,
        captures: &["value"],
        guidance: Some(r#"Replace `By.className("x")` with `page.locator(".x")`."#),
    },
    MappingEntry {
        name: "find_by_tag_name",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.tagName("x"))"#,
        target: r#"locator("x")"#,
        pattern: r#"\bfindElements?\(\s*By\.tagName\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r#"locator("${value}")"#,
        captures: &["value"],
        guidance: None,
    },
    MappingEntry {
        name: "find_by_link_text",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.linkText("x"))"#,
        target: r#"getByRole("link", { name: "x", exact: true })"#,
        pattern: r#"\bfindElements?\(\s*By\.linkText\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r#"getByRole("link", { name: "${value}", exact: true })"#,
        captures: &["value"],
        guidance: Some(r#"Replace `By.linkText("x")` with `page.getByRole("link", { name: "x", exact: true })`."#),
    },
    MappingEntry {
        name: "find_by_partial_link_text",
        category: RuleCategory::Locator,
        legacy: r#"findElement(By.partialLinkText("x"))"#,
        target: r#"getByRole("link", { name: "x" })"#,
        pattern: r#"\bfindElements?\(\s*By\.partialLinkText\(\s*"(?P<value>[^"]+)"\s*\)\s*\)"#,
        replacement: r#"getByRole("link", { name: "${value}" })"#,
        captures: &["value"],
        guidance: None,
    },
    // ── Locators: standalone `By.*` expressions ─────────────────────────
    MappingEntry {
        name: "by_id",
        category: RuleCategory::Locator,
        legacy: r#"By.id("x")"#,
        target: r##""#x""##,
        pattern: r#"\bBy\.id\(\s*"(?P<value>[^"]+)"\s*\)"#,
        replacement: r##""#${value}""##,
        captures: &["value"],
        guidance: None,
    },
    MappingEntry {
        name: "by_css",
        category: RuleCategory::Locator,
        legacy: r#"By.cssSelector("x")"#,
        target: r#""x""#,
        pattern: r#"\bBy\.cssSelector\(\s*"(?P<value>[^"]+)"\s*\)"#,
        replacement: r#""${value}""#,
        captures: &["value"],
        guidance: None,
    },
    MappingEntry {
        name: "by_xpath",
        category: RuleCategory::Locator,
        legacy: r#"By.xpath("x")"#,
        target: r#""xpath=x""#,
        pattern: r#"\bBy\.xpath\(\s*"(?P<value>[^"]+)"\s*\)"#,
        replacement: r#""xpath=${value}""#,
        captures: &["value"],
        guidance: None,
    },
    MappingEntry {
        name: "by_name",
        category: RuleCategory::Locator,
        legacy: r#"By.name("x")"#,
        target: r#""[name='x']""#,
        pattern: r#"\bBy\.name\(\s*"(?P<value>[^"]+)"\s*\)"#,
        replacement: r#""[name='${value}']""#,
        captures: &["value"],
        guidance: None,
    },
    MappingEntry {
        name: "by_class_name",
        category: RuleCategory::Locator,
        legacy: r#"By.className("x")"#,
        target: r#"".x""#,
        pattern: r#"\bBy\.className\(\s*"(?P<value>[^"]+)"\s*\)"#,
        replacement: r#"".${value}""#,
        captures: &["value"],
        guidance: None,
    },
    // ── Actions ─────────────────────────────────────────────────────────
    MappingEntry {
        name: "send_keys",
        category: RuleCategory::Action,
        legacy: ".sendKeys(",
        target: ".fill(",
        pattern: r"\.sendKeys\(",
        replacement: ".fill(",
        captures: &[],
        guidance: Some("Replace `sendKeys` with `fill`."),
    },
    MappingEntry {
        name: "get_text",
        category: RuleCategory::Action,
        legacy: ".getText(",
        target: ".innerText(",
        pattern: r"\.getText\(",
        replacement: ".innerText(",
        captures: &[],
        guidance: Some("Replace `getText()` with `innerText()`."),
    },
    MappingEntry {
        name: "is_displayed",
        category: RuleCategory::Action,
        legacy: ".isDisplayed(",
        target: ".isVisible(",
        pattern: r"\.isDisplayed\(",
        replacement: ".isVisible(",
        captures: &[],
        guidance: Some("Replace `isDisplayed()` with `isVisible()`."),
    },
    // ── Navigation (receiver already renamed to `page`) ─────────────────
    MappingEntry {
        name: "get_url",
        category: RuleCategory::Navigation,
        legacy: "page.get(",
        target: "page.goto(",
        pattern: r"\bpage\.get\(",
        replacement: "page.goto(",
        captures: &[],
        guidance: Some("Replace `driver.get(url)` with `page.goto(url)`."),
    },
    MappingEntry {
        name: "navigate_to",
        category: RuleCategory::Navigation,
        legacy: "page.navigate().to(",
        target: "page.goto(",
        pattern: r"\bpage\.navigate\(\)\.to\(",
        replacement: "page.goto(",
        captures: &[],
        guidance: Some("Replace `driver.navigate().to(url)` with `page.goto(url)`."),
    },
    MappingEntry {
        name: "navigate_back",
        category: RuleCategory::Navigation,
        legacy: "page.navigate().back()",
        target: "page.goBack()",
        pattern: r"\bpage\.navigate\(\)\.back\(\)",
        replacement: "page.goBack()",
        captures: &[],
        guidance: None,
    },
    MappingEntry {
        name: "navigate_forward",
        category: RuleCategory::Navigation,
        legacy: "page.navigate().forward()",
        target: "page.goForward()",
        pattern: r"\bpage\.navigate\(\)\.forward\(\)",
        replacement: "page.goForward()",
        captures: &[],
        guidance: None,
    },
    MappingEntry {
        name: "navigate_refresh",
        category: RuleCategory::Navigation,
        legacy: "page.navigate().refresh()",
        target: "page.reload()",
        pattern: r"\bpage\.navigate\(\)\.refresh\(\)",
        replacement: "page.reload()",
        captures: &[],
        guidance: None,
    },
    MappingEntry {
        name: "get_title",
        category: RuleCategory::Navigation,
        legacy: "page.getTitle()",
        target: "page.title()",
        pattern: r"\bpage\.getTitle\(\)",
        replacement: "page.title()",
        captures: &[],
        guidance: None,
    },
    MappingEntry {
        name: "get_current_url",
        category: RuleCategory::Navigation,
        legacy: "page.getCurrentUrl()",
        target: "page.url()",
        pattern: r"\bpage\.getCurrentUrl\(\)",
        replacement: "page.url()",
        captures: &[],
        guidance: None,
    },
    MappingEntry {
        name: "quit",
        category: RuleCategory::Navigation,
        legacy: "page.quit()",
        target: "page.close()",
        pattern: r"\bpage\.quit\(\)",
        replacement: "page.close()",
        captures: &[],
        guidance: None,
    },
    // ── Assertions ──────────────────────────────────────────────────────
    // Arguments run up to the statement terminator; an argument that itself
    // contains `;` (e.g. inside a string literal) is not handled.
    MappingEntry {
        name: "assert_equals",
        category: RuleCategory::Assertion,
        legacy: "Assert.assertEquals(actual, expected);",
        target: "expect(actual).toBe(expected);",
        pattern: r"\b(?:Assertions?\.)?assertEquals\(\s*(?P<actual>[^,;]+?)\s*,\s*(?P<expected>[^;]+?)\s*\);",
        replacement: "expect(${actual}).toBe(${expected});",
        captures: &["actual", "expected"],
        guidance: Some("Use `expect` from '@playwright/test' for assertions: `assertEquals(a, b)` becomes `expect(a).toBe(b)`."),
    },
    MappingEntry {
        name: "assert_not_equals",
        category: RuleCategory::Assertion,
        legacy: "Assert.assertNotEquals(actual, expected);",
        target: "expect(actual).not.toBe(expected);",
        pattern: r"\b(?:Assertions?\.)?assertNotEquals\(\s*(?P<actual>[^,;]+?)\s*,\s*(?P<expected>[^;]+?)\s*\);",
        replacement: "expect(${actual}).not.toBe(${expected});",
        captures: &["actual", "expected"],
        guidance: None,
    },
    MappingEntry {
        name: "assert_true",
        category: RuleCategory::Assertion,
        legacy: "Assert.assertTrue(condition);",
        target: "expect(condition).toBeTruthy();",
        pattern: r"\b(?:Assertions?\.)?assertTrue\(\s*(?P<condition>[^;]+?)\s*\);",
        replacement: "expect(${condition}).toBeTruthy();",
        captures: &["condition"],
        guidance: Some("`assertTrue(c)` becomes `expect(c).toBeTruthy()`."),
    },
    MappingEntry {
        name: "assert_false",
        category: RuleCategory::Assertion,
        legacy: "Assert.assertFalse(condition);",
        target: "expect(condition).toBeFalsy();",
        pattern: r"\b(?:Assertions?\.)?assertFalse\(\s*(?P<condition>[^;]+?)\s*\);",
        replacement: "expect(${condition}).toBeFalsy();",
        captures: &["condition"],
        guidance: None,
    },
    MappingEntry {
        name: "assert_null",
        category: RuleCategory::Assertion,
        legacy: "Assert.assertNull(value);",
        target: "expect(value).toBeNull();",
        pattern: r"\b(?:Assertions?\.)?assertNull\(\s*(?P<value>[^;]+?)\s*\);",
        replacement: "expect(${value}).toBeNull();",
        captures: &["value"],
        guidance: None,
    },
    MappingEntry {
        name: "assert_not_null",
        category: RuleCategory::Assertion,
        legacy: "Assert.assertNotNull(value);",
        target: "expect(value).not.toBeNull();",
        pattern: r"\b(?:Assertions?\.)?assertNotNull\(\s*(?P<value>[^;]+?)\s*\);",
        replacement: "expect(${value}).not.toBeNull();",
        captures: &["value"],
        guidance: None,
    },
    // ── Waits ───────────────────────────────────────────────────────────
    MappingEntry {
        name: "thread_sleep",
        category: RuleCategory::Wait,
        legacy: "Thread.sleep(ms);",
        target: "await page.waitForTimeout(ms);",
        pattern: r"\bThread\.sleep\(",
        replacement: "await page.waitForTimeout(",
        captures: &[],
        guidance: Some("Use `await` for all async actions; `Thread.sleep(ms)` becomes `await page.waitForTimeout(ms)`."),
    },
];

/// Entries belonging to one category, in table order.
pub fn entries_for(category: RuleCategory) -> impl Iterator<Item = &'static MappingEntry> {
    MAPPING_TABLE.iter().filter(move |e| e.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_is_covered() {
        for category in RuleCategory::ALL {
            assert!(entries_for(category).next().is_some(), "no entries for {}", category);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for entry in MAPPING_TABLE {
            assert!(seen.insert(entry.name), "duplicate rule name {}", entry.name);
        }
    }

    #[test]
    fn test_table_is_in_pipeline_order() {
        let categories: Vec<_> = MAPPING_TABLE.iter().map(|e| e.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }
}
