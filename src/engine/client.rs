use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::types::{ChoiceOutcome, Scenario, StartResponse, SubmitPayload};
use super::ScenarioEngine;
use crate::config::{EngineConfig, RequestConfig};
use crate::error::{EngineError, EngineResult};

/// HTTP client for the remote scenario engine.
///
/// The client performs no automatic retries: a failed call is surfaced as a
/// typed error and retry policy belongs to the caller. Choice submission in
/// particular is treated as non-idempotent, so a timeout is reported as a
/// transient failure rather than silently resubmitted.
#[derive(Clone)]
pub struct EngineClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    request_config: RequestConfig,
}

impl EngineClient {
    /// Create a new engine client
    pub fn new(config: &EngineConfig, request_config: RequestConfig) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(EngineError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            request_config,
        })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> EngineError {
        if e.is_timeout() {
            EngineError::Timeout {
                timeout_ms: self.request_config.timeout_ms,
            }
        } else if e.is_connect() {
            EngineError::Unavailable {
                message: e.to_string(),
            }
        } else {
            EngineError::Network(e)
        }
    }
}

#[async_trait]
impl ScenarioEngine for EngineClient {
    async fn list_scenarios(&self) -> EngineResult<Vec<Scenario>> {
        let url = format!("{}/v1/scenarios", self.base_url);
        debug!(url = %url, "Fetching scenario catalog");

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_body));
        }

        let scenarios: Vec<Scenario> =
            response
                .json()
                .await
                .map_err(|e| EngineError::MalformedResponse {
                    message: format!("Failed to parse scenario catalog: {}", e),
                })?;

        info!(count = scenarios.len(), "Scenario catalog fetched");
        Ok(scenarios)
    }

    async fn start_session(&self, scenario_id: &str) -> EngineResult<StartResponse> {
        let url = format!("{}/v1/sessions", self.base_url);
        let start = Instant::now();

        debug!(scenario = %scenario_id, "Starting scenario session");

        let response = self
            .request(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "scenario_id": scenario_id }))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(EngineError::ScenarioNotFound {
                scenario_id: scenario_id.to_string(),
            });
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_body));
        }

        let started: StartResponse =
            response
                .json()
                .await
                .map_err(|e| EngineError::MalformedResponse {
                    message: format!("Failed to parse start response: {}", e),
                })?;

        info!(
            scenario = %scenario_id,
            session = %started.session_id,
            latency_ms = start.elapsed().as_millis(),
            "Session started"
        );
        Ok(started)
    }

    async fn submit_choice(
        &self,
        session_id: &str,
        choice_index: usize,
    ) -> EngineResult<ChoiceOutcome> {
        let url = format!("{}/v1/sessions/{}/choices", self.base_url, session_id);
        let start = Instant::now();

        debug!(session = %session_id, choice = choice_index, "Submitting choice");

        let response = self
            .request(self.client.post(&url))
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "choice_index": choice_index }))
            .send()
            .await
            .map_err(|e| {
                let mapped = self.map_send_error(e);
                error!(
                    session = %session_id,
                    choice = choice_index,
                    error = %mapped,
                    latency_ms = start.elapsed().as_millis(),
                    "Choice submission failed"
                );
                mapped
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(EngineError::SessionNotFound {
                session_id: session_id.to_string(),
            });
        }
        if status == StatusCode::UNPROCESSABLE_ENTITY || status == StatusCode::BAD_REQUEST {
            return Err(EngineError::InvalidChoice {
                index: choice_index,
            });
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_body));
        }

        let payload: SubmitPayload =
            response
                .json()
                .await
                .map_err(|e| EngineError::MalformedResponse {
                    message: format!("Failed to parse submit response: {}", e),
                })?;

        let outcome = ChoiceOutcome::try_from(payload)?;

        info!(
            session = %session_id,
            choice = choice_index,
            completed = matches!(outcome, ChoiceOutcome::Completion(_)),
            latency_ms = start.elapsed().as_millis(),
            "Choice submission succeeded"
        );
        Ok(outcome)
    }
}

fn status_error(status: StatusCode, body: String) -> EngineError {
    if status.is_server_error() {
        EngineError::Unavailable {
            message: format!("engine returned {}: {}", status.as_u16(), body),
        }
    } else {
        EngineError::Api {
            status: status.as_u16(),
            message: body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = EngineConfig {
            base_url: "https://engine.example.com/".to_string(),
            api_token: Some("test_token".to_string()),
        };

        let client = EngineClient::new(&config, RequestConfig::default()).unwrap();
        assert_eq!(client.base_url(), "https://engine.example.com");
    }

    #[test]
    fn test_status_error_mapping() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
        assert!(matches!(err, EngineError::Unavailable { .. }));

        let err = status_error(StatusCode::UNAUTHORIZED, "no token".to_string());
        assert!(matches!(err, EngineError::Api { status: 401, .. }));
    }
}
