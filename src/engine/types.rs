use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A scenario as listed in the engine catalog. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Difficulty rating, 1 (introductory) to 5 (advanced).
    pub difficulty: u8,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
}

/// A decision point in a scenario graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered choice list; a choice's index is its selection key.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Engine-set terminal flag. A node with zero choices is also terminal.
    #[serde(default)]
    pub is_terminal: bool,
}

/// A selectable option at a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    /// Display hint only; the engine's response is authoritative for scoring.
    #[serde(default)]
    pub points: u32,
}

/// Response to a session start request
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    pub session_id: String,
    pub initial_node: Node,
}

/// Outcome of a choice submission: either the session continues at a new
/// node, or the engine reports completion with the final artifact.
#[derive(Debug, Clone)]
pub enum ChoiceOutcome {
    Continuation(Continuation),
    Completion(Completion),
}

/// Continuation payload for an in-progress session
#[derive(Debug, Clone)]
pub struct Continuation {
    pub next_node: Node,
    pub running_score: i64,
    pub feedback_text: String,
    pub consequence_text: String,
    pub points_earned: u32,
}

/// Completion artifact. These fields are exactly what the engine returned;
/// the client performs no recomputation of the final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub final_score: i64,
    pub final_score_percentage: f64,
    pub elapsed_seconds: u64,
    pub outcome_narrative: String,
    pub legal_explanation: String,
    pub total_xp_earned: u32,
}

impl Node {
    /// Whether this node ends the session.
    pub fn is_end(&self) -> bool {
        self.is_terminal || self.choices.is_empty()
    }
}

/// Raw submit-choice payload as it comes off the wire. Validated into a
/// [`ChoiceOutcome`] so an incomplete payload surfaces as
/// `MalformedResponse` instead of a silent partial update.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitPayload {
    pub completed: bool,
    pub next_node: Option<Node>,
    pub running_score: Option<i64>,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub consequence_text: Option<String>,
    #[serde(default)]
    pub points_earned: Option<u32>,
    pub final_score: Option<i64>,
    pub final_score_percentage: Option<f64>,
    pub elapsed_seconds: Option<u64>,
    #[serde(default)]
    pub outcome_narrative: Option<String>,
    #[serde(default)]
    pub legal_explanation: Option<String>,
    #[serde(default)]
    pub total_xp_earned: Option<u32>,
}

impl TryFrom<SubmitPayload> for ChoiceOutcome {
    type Error = EngineError;

    fn try_from(payload: SubmitPayload) -> Result<Self, Self::Error> {
        if payload.completed {
            let final_score = payload.final_score.ok_or_else(|| missing("final_score"))?;
            let final_score_percentage = payload
                .final_score_percentage
                .ok_or_else(|| missing("final_score_percentage"))?;
            let elapsed_seconds = payload
                .elapsed_seconds
                .ok_or_else(|| missing("elapsed_seconds"))?;

            Ok(ChoiceOutcome::Completion(Completion {
                final_score,
                final_score_percentage,
                elapsed_seconds,
                outcome_narrative: payload.outcome_narrative.unwrap_or_default(),
                legal_explanation: payload.legal_explanation.unwrap_or_default(),
                total_xp_earned: payload.total_xp_earned.unwrap_or(0),
            }))
        } else {
            let next_node = payload.next_node.ok_or_else(|| missing("next_node"))?;
            let running_score = payload
                .running_score
                .ok_or_else(|| missing("running_score"))?;

            Ok(ChoiceOutcome::Continuation(Continuation {
                next_node,
                running_score,
                feedback_text: payload.feedback_text.unwrap_or_default(),
                consequence_text: payload.consequence_text.unwrap_or_default(),
                points_earned: payload.points_earned.unwrap_or(0),
            }))
        }
    }
}

fn missing(field: &str) -> EngineError {
    EngineError::MalformedResponse {
        message: format!("missing required field: {}", field),
    }
}
