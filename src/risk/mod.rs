//! Query risk classifier.
//!
//! A pure function that inspects a free-form query for signs of a request
//! for individualized legal advice and maps it to an ordered severity tier.
//! Safe to call on every keystroke: stateless, idempotent, and cheap.

mod advisory;
mod rules;

pub use advisory::{Advisory, AdvisoryBanner};

use rules::{RiskRule, HIGH_RULES, LOW_RULES, MEDIUM_RULES};

/// Queries shorter than this (in characters, after trimming) are too
/// ambiguous to classify and map to `None` before any pattern evaluation.
pub const MIN_QUERY_LEN: usize = 10;

/// Ordered severity tier. Tier order is a strict precedence: any high-tier
/// match outranks any medium or low match regardless of rule position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskTier {
    None,
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::None => "none",
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifier output: the tier plus, for non-`None` tiers, the name of the
/// triggering rule. The rule name is for observability and tests, never for
/// control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: RiskTier,
    pub rule: Option<&'static str>,
}

impl Classification {
    fn none() -> Self {
        Self {
            tier: RiskTier::None,
            rule: None,
        }
    }
}

/// Classify a query into a risk tier.
///
/// Evaluates the high table, then medium, then low; the first matching rule
/// in the highest matching tier wins. No match in any tier is `None`.
pub fn classify(query: &str) -> Classification {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Classification::none();
    }

    let tiers: [(RiskTier, &[RiskRule]); 3] = [
        (RiskTier::High, &HIGH_RULES),
        (RiskTier::Medium, &MEDIUM_RULES),
        (RiskTier::Low, &LOW_RULES),
    ];

    for (tier, table) in tiers {
        if let Some(rule) = table.iter().find(|r| r.pattern.is_match(trimmed)) {
            tracing::debug!(tier = %tier, rule = rule.name, "Query matched risk rule");
            return Classification {
                tier,
                rule: Some(rule.name),
            };
        }
    }

    Classification::none()
}
