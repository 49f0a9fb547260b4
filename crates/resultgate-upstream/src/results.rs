// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the board-exam result API.
//!
//! One GET per lookup at `{base}/{roll}{serial}/{registration}`. No retries:
//! a failed lookup is reported straight back to the caller.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use resultgate_core::{ResultGateError, ResultQuery, ResultSource};
use resultgate_security::redact;

/// Reported when the result API cannot be reached or returns unreadable JSON.
pub const RESULTS_UNREACHABLE_MESSAGE: &str = "Failed to connect to results service.";

/// HTTP client for the result API.
#[derive(Debug, Clone)]
pub struct ResultsClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ResultsClient {
    /// Create a client rooted at `base_url`.
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, ResultGateError> {
        let base_url = resultgate_security::validate_url(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ResultGateError::Config(format!(
                "results base URL `{base_url}` cannot carry path segments"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lookup URL for `query`. The registration is percent-encoded as a
    /// single path segment.
    pub fn result_url(&self, query: &ResultQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&query.roll_number())
                .push(&query.registration);
        }
        url
    }
}

#[async_trait]
impl ResultSource for ResultsClient {
    fn name(&self) -> &str {
        "results-api"
    }

    async fn fetch_result(&self, query: &ResultQuery) -> Result<Value, ResultGateError> {
        let url = self.result_url(query);
        debug!(roll = %query.roll, serial = %query.serial, "fetching result");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(connect_failure)?;

        let status = response.status();
        debug!(status = %status, "result API responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_error_message(status, &body);
            warn!(status = %status, message = %redact(&message), "result API returned an error");

            return Err(if status == StatusCode::NOT_FOUND {
                ResultGateError::UpstreamNotFound { message }
            } else if status.is_client_error() || status.is_server_error() {
                ResultGateError::UpstreamStatus {
                    status: status.as_u16(),
                    message,
                }
            } else {
                ResultGateError::UpstreamUnavailable {
                    status: 502,
                    message,
                    source: None,
                }
            });
        }

        let body = response.text().await.map_err(connect_failure)?;
        serde_json::from_str(&body).map_err(connect_failure)
    }
}

fn connect_failure(e: impl std::error::Error + Send + Sync + 'static) -> ResultGateError {
    warn!(error = %e, "result API request failed");
    ResultGateError::UpstreamUnavailable {
        status: 502,
        message: RESULTS_UNREACHABLE_MESSAGE.to_string(),
        source: Some(Box::new(e)),
    }
}

/// Error text for a non-success response: the body's `message` (or `error`)
/// string if it is JSON carrying one, otherwise `API Error (status): reason`.
pub fn upstream_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"].iter().find_map(|key| {
                v.get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| {
            format!(
                "API Error ({}): {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        })
}
