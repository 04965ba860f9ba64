use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::RewardConfig;
use crate::transient::TransientSlot;

/// Which display window a reward notice uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Points earned mid-session; shown briefly.
    Progress,
    /// XP earned at completion; shown alongside the persistent summary and
    /// allowed to linger longer.
    Final,
}

/// Transient points/XP notice for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardNotice {
    pub kind: RewardKind,
    pub points: u32,
}

/// Schedules reward notices with self-clearing display windows.
///
/// At most one notice is visible at a time: scheduling while one is pending
/// supersedes it. `cancel` is called on every controller transition that
/// invalidates a pending notice (reset, new start).
pub struct RewardScheduler {
    slot: TransientSlot<RewardNotice>,
    progress_window: Duration,
    final_window: Duration,
}

impl RewardScheduler {
    pub fn new(config: &RewardConfig) -> Self {
        Self {
            slot: TransientSlot::new(),
            progress_window: Duration::from_millis(config.progress_window_ms),
            final_window: Duration::from_millis(config.final_window_ms),
        }
    }

    /// Show an in-progress reward. No-op for zero points.
    pub fn schedule_progress(&self, points: u32) {
        if points == 0 {
            return;
        }
        self.slot.publish(
            RewardNotice {
                kind: RewardKind::Progress,
                points,
            },
            self.progress_window,
        );
    }

    /// Show the final reward. No-op for zero XP.
    pub fn schedule_final(&self, points: u32) {
        if points == 0 {
            return;
        }
        self.slot.publish(
            RewardNotice {
                kind: RewardKind::Final,
                points,
            },
            self.final_window,
        );
    }

    /// Cancel any pending notice and its timer.
    pub fn cancel(&self) {
        self.slot.clear();
    }

    /// The notice currently visible, if any.
    pub fn current(&self) -> Option<RewardNotice> {
        self.slot.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> RewardScheduler {
        RewardScheduler::new(&RewardConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_notice_clears_after_window() {
        let rewards = scheduler();
        rewards.schedule_progress(15);
        assert_eq!(
            rewards.current(),
            Some(RewardNotice {
                kind: RewardKind::Progress,
                points: 15
            })
        );

        tokio::time::advance(Duration::from_millis(4100)).await;
        tokio::task::yield_now().await;
        assert_eq!(rewards.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_notice_lingers_past_progress_window() {
        let rewards = scheduler();
        rewards.schedule_final(120);

        tokio::time::advance(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert!(rewards.current().is_some());

        tokio::time::advance(Duration::from_millis(6000)).await;
        tokio::task::yield_now().await;
        assert_eq!(rewards.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_schedules_leave_one_visible_notice() {
        let rewards = scheduler();
        rewards.schedule_progress(10);
        rewards.schedule_progress(25);

        let visible = rewards.current().unwrap();
        assert_eq!(visible.points, 25);

        // The superseded notice's timer must not clear the new one early.
        tokio::time::advance(Duration::from_millis(3900)).await;
        tokio::task::yield_now().await;
        assert_eq!(rewards.current().map(|n| n.points), Some(25));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_points_schedules_nothing() {
        let rewards = scheduler();
        rewards.schedule_progress(0);
        rewards.schedule_final(0);
        assert_eq!(rewards.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_removes_pending_notice() {
        let rewards = scheduler();
        rewards.schedule_progress(10);
        rewards.cancel();
        assert_eq!(rewards.current(), None);
    }
}
