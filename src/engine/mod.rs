//! Remote scenario engine surface.
//!
//! The engine owns scenario content and session scoring; the client side
//! only mirrors what the engine acknowledges. This module provides:
//! - Wire types for the catalog, nodes, and choice outcomes
//! - The [`ScenarioEngine`] trait the session controller is generic over
//! - [`EngineClient`], the HTTP implementation

mod client;
mod types;

pub use client::EngineClient;
pub use types::{
    Choice, ChoiceOutcome, Completion, Continuation, Node, Scenario, StartResponse,
};

use async_trait::async_trait;

use crate::error::EngineResult;

/// The three logical operations the core needs from the scenario engine.
///
/// The session controller is generic over this trait so tests can drive it
/// with a scripted in-memory engine instead of a live HTTP endpoint.
#[async_trait]
pub trait ScenarioEngine: Send + Sync {
    /// Fetch the catalog of available scenarios.
    async fn list_scenarios(&self) -> EngineResult<Vec<Scenario>>;

    /// Start a new session, returning the engine-issued session id and the
    /// scenario's initial node.
    async fn start_session(&self, scenario_id: &str) -> EngineResult<StartResponse>;

    /// Submit a choice by index. The engine observes choices in submission
    /// order; callers must not overlap submissions for one session.
    async fn submit_choice(
        &self,
        session_id: &str,
        choice_index: usize,
    ) -> EngineResult<ChoiceOutcome>;
}
