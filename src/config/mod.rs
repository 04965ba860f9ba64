use std::env;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
    pub rewards: RewardConfig,
}

/// Scenario engine API configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    /// Bearer token, if the deployment requires one. Transport auth beyond
    /// this header is the caller's concern.
    pub api_token: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration.
///
/// There are deliberately no retry knobs: a failed engine call is surfaced
/// to the caller, who owns retry policy.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
}

/// Display windows for transient notifications
#[derive(Debug, Clone)]
pub struct RewardConfig {
    /// Window for in-progress reward notices.
    pub progress_window_ms: u64,
    /// Window for the final reward notice, shown alongside the completion
    /// summary and so allowed to linger longer.
    pub final_window_ms: u64,
    /// Auto-dismiss interval for low-severity query advisories.
    pub advisory_auto_dismiss_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let engine = EngineConfig {
            base_url: env::var("ENGINE_BASE_URL").map_err(|_| AppError::Config {
                message: "ENGINE_BASE_URL is required".to_string(),
            })?,
            api_token: env::var("ENGINE_API_TOKEN").ok(),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
        };

        let rewards = RewardConfig {
            progress_window_ms: env::var("REWARD_PROGRESS_WINDOW_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4000),
            final_window_ms: env::var("REWARD_FINAL_WINDOW_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10000),
            advisory_auto_dismiss_ms: env::var("ADVISORY_AUTO_DISMISS_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(6000),
        };

        Ok(Config {
            engine,
            logging,
            request,
            rewards,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            progress_window_ms: 4000,
            final_window_ms: 10000,
            advisory_auto_dismiss_ms: 6000,
        }
    }
}
