//! Scenario session controller.
//!
//! Owns the `selecting -> active -> completed` lifecycle, mediates every
//! choice submission against the remote engine, and guarantees the rendered
//! state never reflects a stale or out-of-order engine response.

mod controller;
mod rewards;
mod state;

pub use controller::{SessionController, TurnOutcome};
pub use rewards::{RewardKind, RewardNotice, RewardScheduler};
pub use state::{ActiveSession, ConsequenceEntry, Phase, SessionSnapshot};
