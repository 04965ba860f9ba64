use std::sync::Mutex;

use tracing::{info, warn};

use super::rewards::{RewardNotice, RewardScheduler};
use super::state::{ActiveSession, ConsequenceEntry, Phase, SessionSnapshot};
use crate::config::RewardConfig;
use crate::engine::{ChoiceOutcome, Completion, Continuation, Scenario, ScenarioEngine};
use crate::error::{ControllerError, ControllerResult};

/// Result of an accepted choice submission.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// The session advanced to a new node.
    Continued(Continuation),
    /// The session finished; the artifact is also retained in the snapshot.
    Completed(Completion),
}

struct ControllerState {
    phase: Phase,
    session: Option<ActiveSession>,
    artifact: Option<Completion>,
    /// Bumped on every start and reset. A response whose captured epoch no
    /// longer matches belongs to a discarded session and is dropped.
    epoch: u64,
    /// Exactly one choice submission may be outstanding at a time; the
    /// engine observes choices in submission order.
    in_flight: bool,
}

/// Drives one user's traversal of a branching scenario.
///
/// The controller owns at most one session at a time and mirrors only what
/// the engine has acknowledged: it never advances the current node
/// speculatively, never recomputes scores, and never retries a failed call.
/// State lives behind a mutex that is released across every network
/// round-trip, so a `reset` issued mid-flight takes effect immediately and
/// the late response is discarded via the epoch guard.
pub struct SessionController<E: ScenarioEngine> {
    engine: E,
    rewards: RewardScheduler,
    state: Mutex<ControllerState>,
}

impl<E: ScenarioEngine> SessionController<E> {
    /// Create a controller in the `Selecting` phase.
    pub fn new(engine: E, reward_config: &RewardConfig) -> Self {
        Self {
            engine,
            rewards: RewardScheduler::new(reward_config),
            state: Mutex::new(ControllerState {
                phase: Phase::Selecting,
                session: None,
                artifact: None,
                epoch: 0,
                in_flight: false,
            }),
        }
    }

    /// Fetch the scenario catalog for the selection screen.
    pub async fn available_scenarios(&self) -> ControllerResult<Vec<Scenario>> {
        Ok(self.engine.list_scenarios().await?)
    }

    /// Start a scenario session.
    ///
    /// Valid from any phase: an in-progress or completed session is
    /// discarded up front, so a failed start leaves the controller in
    /// `Selecting` with no partial session.
    pub async fn start(&self, scenario_id: &str) -> ControllerResult<()> {
        let epoch = {
            let mut state = self.lock_state();
            let from = state.phase;
            state.discard_session();
            if from != Phase::Selecting {
                info!(from = %from, to = %Phase::Selecting, "Discarded prior session for new start");
            }
            state.epoch
        };
        self.rewards.cancel();

        let started = self.engine.start_session(scenario_id).await?;

        let mut state = self.lock_state();
        if state.epoch != epoch {
            warn!(
                scenario = %scenario_id,
                "Discarding start response that arrived after a reset"
            );
            return Err(ControllerError::SessionReset);
        }

        info!(
            scenario = %scenario_id,
            session = %started.session_id,
            from = %state.phase,
            to = %Phase::Active,
            "Session started"
        );
        state.session = Some(ActiveSession::new(
            started.session_id,
            scenario_id.to_string(),
            started.initial_node,
        ));
        state.phase = Phase::Active;
        Ok(())
    }

    /// Submit the choice at `index` on the current node.
    ///
    /// Rejected locally, without contacting the engine, when the session is
    /// not active, the index is out of range, or a submission is already in
    /// flight.
    pub async fn submit_choice(&self, index: usize) -> ControllerResult<TurnOutcome> {
        let (session_id, node_id, epoch) = {
            let mut state = self.lock_state();
            if state.phase != Phase::Active {
                return Err(ControllerError::NoActiveSession { phase: state.phase });
            }
            if state.in_flight {
                return Err(ControllerError::SubmissionInFlight);
            }
            let session = state
                .session
                .as_ref()
                .ok_or(ControllerError::NoActiveSession { phase: state.phase })?;
            let available = session.current_node.choices.len();
            if index >= available {
                return Err(ControllerError::ChoiceOutOfRange { index, available });
            }
            let ids = (
                session.session_id.clone(),
                session.current_node.id.clone(),
                state.epoch,
            );
            state.in_flight = true;
            ids
        };

        let result = self.engine.submit_choice(&session_id, index).await;

        let mut state = self.lock_state();
        if state.epoch != epoch {
            // The session this response belongs to was reset mid-flight.
            // Its in_flight flag was cleared with the rest of the state.
            warn!(
                session = %session_id,
                choice = index,
                "Discarding late choice response after reset"
            );
            return Err(ControllerError::SessionReset);
        }
        state.in_flight = false;

        let outcome = result?;
        match outcome {
            ChoiceOutcome::Continuation(continuation) => {
                let session = state
                    .session
                    .as_mut()
                    .ok_or(ControllerError::SessionReset)?;
                session.history.push(ConsequenceEntry {
                    node_id,
                    choice_index: index,
                    feedback_text: continuation.feedback_text.clone(),
                    consequence_text: continuation.consequence_text.clone(),
                    points_earned: continuation.points_earned,
                });
                session.current_node = continuation.next_node.clone();
                session.running_score = continuation.running_score;
                drop(state);

                self.rewards.schedule_progress(continuation.points_earned);
                Ok(TurnOutcome::Continued(continuation))
            }
            ChoiceOutcome::Completion(completion) => {
                if let Some(session) = state.session.as_mut() {
                    // The engine is authoritative over the final score.
                    session.running_score = completion.final_score;
                }
                state.artifact = Some(completion.clone());
                info!(
                    session = %session_id,
                    final_score = completion.final_score,
                    from = %state.phase,
                    to = %Phase::Completed,
                    "Session completed"
                );
                state.phase = Phase::Completed;
                drop(state);

                self.rewards.schedule_final(completion.total_xp_earned);
                Ok(TurnOutcome::Completed(completion))
            }
        }
    }

    /// Return to `Selecting`, discarding all session state.
    ///
    /// Always succeeds. Cancels any pending reward notice and invalidates
    /// any in-flight submission, whose response will be discarded on
    /// arrival.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        let from = state.phase;
        state.discard_session();
        drop(state);

        self.rewards.cancel();
        info!(from = %from, to = %Phase::Selecting, "Session reset");
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.lock_state().phase
    }

    /// Cloned view of the current state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock_state();
        SessionSnapshot {
            phase: state.phase,
            session: state.session.clone(),
            artifact: state.artifact.clone(),
        }
    }

    /// The reward notice currently visible, if any.
    pub fn current_reward(&self) -> Option<RewardNotice> {
        self.rewards.current()
    }

    /// Access the underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ControllerState> {
        self.state.lock().expect("controller state lock poisoned")
    }
}

impl ControllerState {
    /// Drop session data and invalidate any in-flight response.
    fn discard_session(&mut self) {
        self.phase = Phase::Selecting;
        self.session = None;
        self.artifact = None;
        self.epoch += 1;
        self.in_flight = false;
    }
}
