use std::time::Duration;

use super::{Classification, RiskTier};
use crate::config::RewardConfig;
use crate::transient::TransientSlot;

/// Warning banner content derived from a non-`None` classification.
///
/// Every advisory offers an attorney-referral action. Low-severity
/// advisories auto-dismiss after a fixed interval; medium and high require
/// an explicit dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub tier: RiskTier,
    pub rule: Option<&'static str>,
    pub requires_dismissal: bool,
}

/// Presentation-layer holder for the current query advisory.
///
/// Driving this never feeds back into the classifier or the session
/// controller; it only mirrors the latest classification for display.
pub struct AdvisoryBanner {
    slot: TransientSlot<Advisory>,
    auto_dismiss: Duration,
}

impl AdvisoryBanner {
    pub fn new(config: &RewardConfig) -> Self {
        Self {
            slot: TransientSlot::new(),
            auto_dismiss: Duration::from_millis(config.advisory_auto_dismiss_ms),
        }
    }

    /// Show the advisory for a classification. `None`-tier classifications
    /// leave the banner untouched.
    pub fn show(&self, classification: Classification) {
        match classification.tier {
            RiskTier::None => {}
            RiskTier::Low => self.slot.publish(
                Advisory {
                    tier: classification.tier,
                    rule: classification.rule,
                    requires_dismissal: false,
                },
                self.auto_dismiss,
            ),
            RiskTier::Medium | RiskTier::High => self.slot.publish_sticky(Advisory {
                tier: classification.tier,
                rule: classification.rule,
                requires_dismissal: true,
            }),
        }
    }

    /// Explicitly dismiss the banner.
    pub fn dismiss(&self) {
        self.slot.clear();
    }

    /// The advisory currently shown, if any.
    pub fn current(&self) -> Option<Advisory> {
        self.slot.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::classify;

    fn banner() -> AdvisoryBanner {
        AdvisoryBanner::new(&RewardConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_none_tier_shows_nothing() {
        let banner = banner();
        banner.show(classify("hi"));
        assert!(banner.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_low_advisory_auto_dismisses() {
        let banner = banner();
        banner.show(classify("What is probable cause?"));

        let advisory = banner.current().unwrap();
        assert_eq!(advisory.tier, RiskTier::Low);
        assert!(!advisory.requires_dismissal);

        tokio::time::advance(Duration::from_millis(6100)).await;
        tokio::task::yield_now().await;
        assert!(banner.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_high_advisory_requires_explicit_dismissal() {
        let banner = banner();
        banner.show(classify("Should I sue my landlord for this?"));

        let advisory = banner.current().unwrap();
        assert_eq!(advisory.tier, RiskTier::High);
        assert!(advisory.requires_dismissal);

        tokio::time::advance(Duration::from_secs(3600)).await;
        tokio::task::yield_now().await;
        assert!(banner.current().is_some());

        banner.dismiss();
        assert!(banner.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_advisory_supersedes_pending_one() {
        let banner = banner();
        banner.show(classify("What is probable cause?"));
        banner.show(classify("What are my rights during a traffic stop?"));

        let advisory = banner.current().unwrap();
        assert_eq!(advisory.tier, RiskTier::Medium);
    }
}
