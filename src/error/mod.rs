use thiserror::Error;

use crate::session::Phase;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Session error: {0}")]
    Controller(#[from] ControllerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Scenario engine errors.
///
/// Transient failures (`Network`, `Timeout`, `Unavailable`) carry no state
/// change and the caller may retry; the core itself never retries.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine unavailable: {message}")]
    Unavailable { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Unknown scenario: {scenario_id}")]
    ScenarioNotFound { scenario_id: String },

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Choice {index} rejected by engine")]
    InvalidChoice { index: usize },

    #[error("Malformed engine response: {message}")]
    MalformedResponse { message: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),
}

/// Session controller errors.
///
/// Local rejections (`NoActiveSession`, `ChoiceOutOfRange`,
/// `SubmissionInFlight`) are raised before any engine contact.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("No active session (phase: {phase})")]
    NoActiveSession { phase: Phase },

    #[error("Choice index {index} out of range ({available} choices available)")]
    ChoiceOutOfRange { index: usize, available: usize },

    #[error("A choice submission is already in flight")]
    SubmissionInFlight,

    #[error("Session was reset while the submission was in flight")]
    SessionReset,

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl EngineError {
    /// Whether the failure is transient and a caller-driven retry is sensible.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EngineError::Unavailable { .. }
                | EngineError::Timeout { .. }
                | EngineError::Network(_)
        )
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type alias for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing key");
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::Unavailable {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Engine unavailable: connection refused");

        let err = EngineError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "Request timeout after 5000ms");

        let err = EngineError::ScenarioNotFound {
            scenario_id: "tenant-rights-101".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown scenario: tenant-rights-101");

        let err = EngineError::SessionNotFound {
            session_id: "sess-123".to_string(),
        };
        assert_eq!(err.to_string(), "Session not found: sess-123");

        let err = EngineError::InvalidChoice { index: 7 };
        assert_eq!(err.to_string(), "Choice 7 rejected by engine");

        let err = EngineError::MalformedResponse {
            message: "continuation without next_node".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed engine response: continuation without next_node"
        );

        let err = EngineError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - unauthorized");
    }

    #[test]
    fn test_controller_error_display() {
        let err = ControllerError::NoActiveSession {
            phase: Phase::Selecting,
        };
        assert_eq!(err.to_string(), "No active session (phase: selecting)");

        let err = ControllerError::ChoiceOutOfRange {
            index: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "Choice index 3 out of range (2 choices available)"
        );

        let err = ControllerError::SubmissionInFlight;
        assert_eq!(err.to_string(), "A choice submission is already in flight");
    }

    #[test]
    fn test_transient_classification() {
        assert!(EngineError::Timeout { timeout_ms: 1000 }.is_transient());
        assert!(EngineError::Unavailable {
            message: "down".to_string()
        }
        .is_transient());
        assert!(!EngineError::InvalidChoice { index: 0 }.is_transient());
        assert!(!EngineError::SessionNotFound {
            session_id: "s".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_engine_error_conversion_to_controller_error() {
        let engine_err = EngineError::Timeout { timeout_ms: 1000 };
        let ctrl_err: ControllerError = engine_err.into();
        assert!(matches!(ctrl_err, ControllerError::Engine(_)));
    }

    #[test]
    fn test_controller_error_conversion_to_app_error() {
        let ctrl_err = ControllerError::SubmissionInFlight;
        let app_err: AppError = ctrl_err.into();
        assert!(matches!(app_err, AppError::Controller(_)));
        assert!(app_err.to_string().contains("in flight"));
    }
}
