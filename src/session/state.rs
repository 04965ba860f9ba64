use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{Completion, Node};

/// Lifecycle phase of the controller.
///
/// `Selecting` has no session; `Active` has exactly one; `Completed` holds
/// the terminal artifact until an explicit reset (or a new start) returns
/// the controller to `Selecting`. Completion is monotonic: a completed
/// session never accepts further submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No active session; the scenario catalog is shown.
    Selecting,
    /// A session is in progress.
    Active,
    /// The session finished; the completion artifact is available.
    Completed,
}

impl Phase {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Selecting => "selecting",
            Phase::Active => "active",
            Phase::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One acknowledged choice round-trip, kept in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsequenceEntry {
    /// Node the choice was made at.
    pub node_id: String,
    /// Index of the submitted choice.
    pub choice_index: usize,
    pub feedback_text: String,
    pub consequence_text: String,
    pub points_earned: u32,
}

/// Client-side mirror of an in-progress session.
///
/// `current_node` is always the last node the engine acknowledged; the
/// controller never advances it speculatively. `running_score` is adopted
/// verbatim from engine responses.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Opaque, engine-issued session identifier.
    pub session_id: String,
    pub scenario_id: String,
    pub current_node: Node,
    pub running_score: i64,
    pub history: Vec<ConsequenceEntry>,
    pub started_at: DateTime<Utc>,
}

impl ActiveSession {
    pub(crate) fn new(session_id: String, scenario_id: String, initial_node: Node) -> Self {
        Self {
            session_id,
            scenario_id,
            current_node: initial_node,
            running_score: 0,
            history: Vec::new(),
            started_at: Utc::now(),
        }
    }
}

/// Cloned view of controller state for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: Phase,
    /// Present in `Active` and `Completed` (the traversal that finished).
    pub session: Option<ActiveSession>,
    /// Present only in `Completed`; exactly the engine's completion fields.
    pub artifact: Option<Completion>,
}
