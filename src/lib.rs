//! # Scenario Session Core
//!
//! Client-side core for interactive legal-education scenario sessions: the
//! session state machine that drives a user through a branching decision
//! simulation, and the text-risk classifier that inspects free-form queries
//! for signs of a request for individualized legal advice.
//!
//! ## Features
//!
//! - **Session Controller**: `selecting -> active -> completed` lifecycle,
//!   with choice submissions mediated against a remote scenario engine
//! - **Ordering Guarantees**: one in-flight submission at a time, late
//!   responses after a reset discarded, no speculative state advances
//! - **Reward Notices**: transient points/XP notifications on cancellable
//!   timers, with distinct in-progress and final display windows
//! - **Risk Classifier**: pure, ordered pattern evaluation producing one of
//!   four severity tiers plus the triggering rule
//! - **Query Advisories**: banner state for non-trivial classifications,
//!   auto-dismissing for low severity
//!
//! ## Architecture
//!
//! ```text
//! UI events → SessionController (Rust) → Scenario Engine (HTTP)
//!                    ↓
//!            RewardScheduler (timers)
//!
//! query text → classify() → AdvisoryBanner
//! ```
//!
//! The engine is the system of record: scoring and graph traversal happen
//! server-side, and the controller mirrors only acknowledged state. Nothing
//! is persisted client-side.
//!
//! ## Example
//!
//! ```ignore
//! use scenario_session_core::{Config, SessionController};
//! use scenario_session_core::engine::EngineClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let engine = EngineClient::new(&config.engine, config.request.clone())?;
//!     let controller = SessionController::new(engine, &config.rewards);
//!     controller.start("tenant-rights-101").await?;
//!     let outcome = controller.submit_choice(0).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management.
pub mod config;
/// Remote scenario engine client and wire types.
pub mod engine;
/// Error types and result aliases for the crate.
pub mod error;
/// Query risk classification and advisory presentation state.
pub mod risk;
/// Scenario session controller, state, and reward notices.
pub mod session;
/// Cancellable transient-value timers shared by notices and advisories.
pub mod transient;

pub use config::Config;
pub use error::{AppError, AppResult, ControllerError, EngineError};
pub use risk::{classify, Classification, RiskTier};
pub use session::{Phase, SessionController, SessionSnapshot, TurnOutcome};
