//! Compiled rewrite rules.

use regex::Regex;
use std::collections::BTreeSet;
use thiserror::Error;

use super::mapping::{MappingEntry, RuleCategory};

/// Construction-time defects in the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleDefect {
    #[error("rule '{rule}': invalid pattern: {reason}")]
    InvalidPattern { rule: String, reason: String },

    #[error("rule '{rule}': replacement references undefined capture group '{group}'")]
    DanglingReference { rule: String, group: String },

    #[error("rule '{rule}': capture group '{group}' is never used by the replacement")]
    UnusedCapture { rule: String, group: String },

    #[error("rule '{rule}': declared captures {declared:?} do not match pattern captures {actual:?}")]
    CaptureMismatch {
        rule: String,
        declared: Vec<String>,
        actual: Vec<String>,
    },

    #[error("rule '{rule}' ({category}) is listed after a later-stage rule ({previous})")]
    OutOfOrder {
        rule: String,
        category: RuleCategory,
        previous: RuleCategory,
    },
}

/// A mapping entry with its pattern compiled and its capture groups verified.
#[derive(Debug, Clone)]
pub struct MappingRule {
    name: &'static str,
    category: RuleCategory,
    pattern: Regex,
    replacement: &'static str,
}

impl MappingRule {
    pub fn compile(entry: &MappingEntry) -> Result<Self, RuleDefect> {
        let pattern = Regex::new(entry.pattern).map_err(|e| RuleDefect::InvalidPattern {
            rule: entry.name.to_string(),
            reason: e.to_string(),
        })?;

        let in_pattern: BTreeSet<String> = pattern
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();
        let in_replacement = template_references(entry.replacement);
        let declared: BTreeSet<String> = entry.captures.iter().map(|c| c.to_string()).collect();

        if let Some(group) = in_replacement.difference(&in_pattern).next() {
            return Err(RuleDefect::DanglingReference {
                rule: entry.name.to_string(),
                group: group.clone(),
            });
        }
        if let Some(group) = in_pattern.difference(&in_replacement).next() {
            return Err(RuleDefect::UnusedCapture {
                rule: entry.name.to_string(),
                group: group.clone(),
            });
        }
        if declared != in_pattern {
            return Err(RuleDefect::CaptureMismatch {
                rule: entry.name.to_string(),
                declared: declared.into_iter().collect(),
                actual: in_pattern.into_iter().collect(),
            });
        }

        Ok(Self {
            name: entry.name,
            category: entry.category,
            pattern,
            replacement: entry.replacement,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// Rewrite every non-overlapping match in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }

    pub fn match_count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// Group names referenced by a `regex` replacement template.
///
/// Handles `$name`, `${name}` and the `$$` escape. Numeric references are
/// reported by their digits, which never match a named group and so surface
/// as dangling.
fn template_references(template: &str) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    let bytes = template.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'$') => i += 2,
            Some(b'{') => {
                let start = i + 2;
                match template[start..].find('}') {
                    Some(len) => {
                        refs.insert(template[start..start + len].to_string());
                        i = start + len + 1;
                    }
                    None => i = bytes.len(),
                }
            }
            Some(_) => {
                let start = i + 1;
                let len = template[start..]
                    .bytes()
                    .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
                    .count();
                if len > 0 {
                    refs.insert(template[start..start + len].to_string());
                }
                i = start + len.max(1);
            }
            None => i += 1,
        }
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pattern: &'static str, replacement: &'static str, captures: &'static [&'static str]) -> MappingEntry {
        MappingEntry {
            name: "sample_rule",
            category: RuleCategory::Locator,
            legacy: "",
            target: "",
            pattern,
            replacement,
            captures,
            guidance: None,
        }
    }

    #[test]
    fn test_template_references() {
        let refs = template_references(r##"locator("#${value}") $other $$literal"##);
        assert!(refs.contains("value"));
        assert!(refs.contains("other"));
        assert!(!refs.contains("literal"));
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_compile_accepts_matching_groups() {
        let rule = MappingRule::compile(&entry(r#"By\.id\("(?P<value>[^"]+)"\)"#, r##""#${value}""##, &["value"])).unwrap();
        assert_eq!(rule.apply(r#"By.id("user")"#), r##""#user""##);
    }

    #[test]
    fn test_dangling_reference_is_a_defect() {
        let err = MappingRule::compile(&entry(r"foo\(", "bar(${arg}", &[])).unwrap_err();
        assert!(matches!(err, RuleDefect::DanglingReference { ref group, .. } if group == "arg"));
    }

    #[test]
    fn test_unused_capture_is_a_defect() {
        let err = MappingRule::compile(&entry(r"foo\((?P<arg>\w+)\)", "bar()", &["arg"])).unwrap_err();
        assert!(matches!(err, RuleDefect::UnusedCapture { .. }));
    }

    #[test]
    fn test_undeclared_capture_is_a_defect() {
        let err = MappingRule::compile(&entry(r"foo\((?P<arg>\w+)\)", "bar(${arg})", &[])).unwrap_err();
        assert!(matches!(err, RuleDefect::CaptureMismatch { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_a_defect() {
        let err = MappingRule::compile(&entry(r"foo(", "bar", &[])).unwrap_err();
        assert!(matches!(err, RuleDefect::InvalidPattern { .. }));
    }

    #[test]
    fn test_apply_is_global() {
        let rule = MappingRule::compile(&entry(r"\.sendKeys\(", ".fill(", &[])).unwrap();
        let text = "a.sendKeys(x); b.sendKeys(y);";
        assert_eq!(rule.match_count(text), 2);
        assert_eq!(rule.apply(text), "a.fill(x); b.fill(y);");
    }
}
