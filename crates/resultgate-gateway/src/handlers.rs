// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the two flows.
//!
//! Handles POST /api/details and POST /api/full-result. Both take the raw
//! body so validation owns every 400 response.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use resultgate_core::{DetailsSummary, ResultGateError};

use crate::server::GatewayState;
use crate::validation;
use crate::verifier;

/// Returned by the full-result flow when payment checks out but the result
/// API has no record for the roll/serial/registration.
pub const FULL_RESULT_REMAP_MESSAGE: &str = "Result found (payment verified) but could not retrieve full details. Please check roll/no/registration or contact support.";

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Response body for POST /api/details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_no: Option<Value>,
    pub payment_button_id: String,
}

impl DetailsResponse {
    fn new(summary: DetailsSummary, payment_button_id: String) -> Self {
        Self {
            name: summary.name,
            roll_no: summary.roll_no,
            reg_no: summary.reg_no,
            payment_button_id,
        }
    }
}

/// Render an error as a `{message}` envelope with its status.
pub fn error_response(err: &ResultGateError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(status = status.as_u16(), error = %err, "request failed");
    } else {
        info!(status = status.as_u16(), error = %err, "request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            message: err.public_message(),
        }),
    )
        .into_response()
}

/// Map a body-buffering failure onto the `{message}` envelope: 413 when
/// the body is over the limit, 400 otherwise.
fn body_error(rejection: &BytesRejection) -> ResultGateError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ResultGateError::PayloadTooLarge
    } else {
        warn!(error = %rejection.body_text(), "request body could not be read");
        ResultGateError::malformed(validation::INVALID_JSON_MESSAGE)
    }
}

/// Validate, resolve the payment button, then look up the result summary.
pub async fn details_flow(
    state: &GatewayState,
    body: &[u8],
) -> Result<DetailsResponse, ResultGateError> {
    let input = validation::parse_details(body)?;
    let button_id = state
        .referral
        .resolve(input.referral_key.as_deref())
        .to_string();

    let record = state.results.fetch_result(&input.query).await?;
    let summary = DetailsSummary::from_record(&record);

    let missing = summary.missing_fields();
    if !missing.is_empty() {
        warn!(
            source = state.results.name(),
            ?missing,
            "result record is missing summary fields"
        );
    }

    Ok(DetailsResponse::new(summary, button_id))
}

/// Validate, verify payment, then fetch the full result record.
pub async fn full_result_flow(
    state: &GatewayState,
    body: &[u8],
) -> Result<Value, ResultGateError> {
    let request = validation::parse_full_result(body)?;
    verifier::verify_payment(state.payments.as_ref(), &request).await?;

    state
        .results
        .fetch_result(&request.query)
        .await
        .map_err(|e| {
            if e.is_upstream_not_found() {
                warn!(upstream = %e, "payment verified but result record not found");
                ResultGateError::UpstreamStatus {
                    status: 500,
                    message: FULL_RESULT_REMAP_MESSAGE.to_string(),
                }
            } else {
                e
            }
        })
}

/// POST /api/details
pub async fn post_details(
    State(state): State<GatewayState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(&body_error(&rejection)),
    };
    match details_flow(&state, &body).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /api/full-result
pub async fn post_full_result(
    State(state): State<GatewayState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return error_response(&body_error(&rejection)),
    };
    match full_result_flow(&state, &body).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Fallback for paths with no flow.
pub async fn not_found() -> Response {
    error_response(&ResultGateError::RouteNotFound)
}
