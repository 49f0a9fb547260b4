// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error type shared by the upstream clients, the gateway flows, and startup.
//!
//! Every variant knows the HTTP status it surfaces as and the text placed in
//! the `{message}` envelope. Startup-only variants never reach a client
//! verbatim; they collapse to a generic 500 message.

use thiserror::Error;

/// Message used when a failure carries nothing safe to show the caller.
pub const GENERIC_FAILURE_MESSAGE: &str = "Internal server error.";

/// The primary error type used across resultgate.
#[derive(Debug, Error)]
pub enum ResultGateError {
    /// Request body could not be parsed or a field failed its pattern (400).
    #[error("{message}")]
    MalformedInput { message: String },

    /// No payment record matched the roll/serial/identifier triple (403).
    #[error("{message}")]
    VerificationFailed { message: String },

    /// An upstream service could not be reached or returned something
    /// unreadable. Carries its own status (500, 502 or 503 depending on
    /// the call site).
    #[error("{message}")]
    UpstreamUnavailable {
        status: u16,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An upstream service answered with a body of the wrong shape (500).
    #[error("{message}")]
    UpstreamData { message: String },

    /// The result API answered 404.
    #[error("{message}")]
    UpstreamNotFound { message: String },

    /// The result API answered with some other non-success status, which is
    /// passed through to the caller.
    #[error("{message}")]
    UpstreamStatus { status: u16, message: String },

    /// The request used a method other than POST or OPTIONS (405).
    #[error("method not allowed")]
    MethodNotAllowed,

    /// No flow is mounted at the request path (404).
    #[error("route not found")]
    RouteNotFound,

    /// The request body exceeded the buffering limit (413).
    #[error("request body too large")]
    PayloadTooLarge,

    /// Configuration errors detected after loading.
    #[error("configuration error: {0}")]
    Config(String),

    /// Server startup or listener errors.
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A failure that escaped the flows, such as a panic. Carries the
    /// failure's own text when it had one.
    #[error("unhandled failure: {}", .message.as_deref().unwrap_or("no message"))]
    Unhandled { message: Option<String> },
}

impl ResultGateError {
    /// Shorthand for a 400 with the given message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedInput { .. } => 400,
            Self::VerificationFailed { .. } => 403,
            Self::UpstreamUnavailable { status, .. } => *status,
            Self::UpstreamData { .. } => 500,
            Self::UpstreamNotFound { .. } => 404,
            Self::UpstreamStatus { status, .. } => *status,
            Self::MethodNotAllowed => 405,
            Self::RouteNotFound => 404,
            Self::PayloadTooLarge => 413,
            Self::Config(_) | Self::Server { .. } | Self::Unhandled { .. } => 500,
        }
    }

    /// Text for the `{message}` response body.
    pub fn public_message(&self) -> String {
        match self {
            Self::MalformedInput { message }
            | Self::VerificationFailed { message }
            | Self::UpstreamUnavailable { message, .. }
            | Self::UpstreamData { message }
            | Self::UpstreamNotFound { message }
            | Self::UpstreamStatus { message, .. } => message.clone(),
            Self::MethodNotAllowed => "Method not allowed.".to_string(),
            Self::RouteNotFound => "Not found.".to_string(),
            Self::PayloadTooLarge => "Request body too large.".to_string(),
            Self::Unhandled { message } => message
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            Self::Config(_) | Self::Server { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// True when the result API reported the record as missing.
    pub fn is_upstream_not_found(&self) -> bool {
        matches!(self, Self::UpstreamNotFound { .. })
    }
}
