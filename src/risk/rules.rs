//! Ordered pattern-rule tables for query risk classification.
//!
//! Three fixed tiers evaluated high -> medium -> low; within a tier, rules
//! are checked in listed order and the first match wins. The exact patterns
//! are policy and may be tuned; the tier precedence and ordering contract
//! must hold.

use once_cell::sync::Lazy;
use regex::Regex;

/// One case-insensitive pattern rule. `name` identifies the rule in
/// classification output for observability and testing.
pub(crate) struct RiskRule {
    pub name: &'static str,
    pub pattern: Regex,
}

fn rule(name: &'static str, pattern: &str) -> RiskRule {
    RiskRule {
        name,
        // Patterns are fixed at build time and validated by the table tests.
        pattern: Regex::new(pattern).expect("invalid risk rule pattern"),
    }
}

/// Direct requests for action recommendations tied to a personal legal
/// situation.
pub(crate) static HIGH_RULES: Lazy<Vec<RiskRule>> = Lazy::new(|| {
    vec![
        rule(
            "personal-action-request",
            r"(?i)\bshould i (sue|file|plead|settle|accept|sign|report)\b",
        ),
        rule(
            "personal-matter",
            r"(?i)\bmy (case|lawsuit|divorce|custody|contract|lease|landlord|employer|arrest|charges?|hearing)\b",
        ),
        rule(
            "help-me-act",
            r"(?i)\bhelp me (file|sue|fight|respond|appeal|write|draft)\b",
        ),
        rule("can-i-take-action", r"(?i)\bcan i (sue|press charges|file)\b"),
    ]
});

/// General rights/legality questions with a conditional or personal framing.
pub(crate) static MEDIUM_RULES: Lazy<Vec<RiskRule>> = Lazy::new(|| {
    vec![
        rule("my-rights", r"(?i)\bwhat are my rights\b"),
        rule(
            "legality-question",
            r"(?i)\bis (this|that|it) (legal|illegal|allowed|against the law)\b",
        ),
        rule("conditional-outcome", r"(?i)\bwhat happens if\b"),
        rule("obligation-question", r"(?i)\bdo i have to\b"),
    ]
});

/// Definitional or explanatory phrasing.
pub(crate) static LOW_RULES: Lazy<Vec<RiskRule>> = Lazy::new(|| {
    vec![
        rule("definition-question", r"(?i)\bwhat (is|are)\b"),
        rule("mechanism-question", r"(?i)\bhow do(es)?\b"),
        rule("definition-of", r"(?i)\b(definition|meaning) of\b"),
        rule("explainer-request", r"(?i)\bexplain\b"),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_compile_and_are_nonempty() {
        assert!(!HIGH_RULES.is_empty());
        assert!(!MEDIUM_RULES.is_empty());
        assert!(!LOW_RULES.is_empty());
    }

    #[test]
    fn test_rules_are_case_insensitive() {
        assert!(HIGH_RULES[0].pattern.is_match("SHOULD I SUE over this?"));
        assert!(MEDIUM_RULES[0].pattern.is_match("WHAT ARE MY RIGHTS here"));
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<&str> = HIGH_RULES
            .iter()
            .chain(MEDIUM_RULES.iter())
            .chain(LOW_RULES.iter())
            .map(|r| r.name)
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
