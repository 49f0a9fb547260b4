// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, the edge middleware (method gate and fixed response
//! headers), panic recovery, and request tracing.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::{self as axum_middleware, Next},
    response::{IntoResponse, Response},
    routing::post,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use resultgate_config::ServerConfig;
use resultgate_core::{PaymentSource, ResultGateError, ResultSource};

use crate::handlers;
use crate::referral::ReferralResolver;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Result API lookups.
    pub results: Arc<dyn ResultSource>,
    /// Payment-record store.
    pub payments: Arc<dyn PaymentSource>,
    /// Referral key to payment-button table.
    pub referral: Arc<ReferralResolver>,
}

/// Build the application router.
///
/// - POST /api/details
/// - POST /api/full-result
/// - OPTIONS on any path answers 200 with an empty body
/// - any other method answers 405; unknown paths answer 404
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/details", post(handlers::post_details))
        .route("/api/full-result", post(handlers::post_full_result))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum_middleware::from_fn(edge_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Method gate plus the cross-origin and content-type headers every
/// response carries. The content type is overwritten so that responses
/// produced below the handlers (extractor rejections) still read as JSON.
pub async fn edge_middleware(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else if request.method() == Method::POST {
        next.run(request).await
    } else {
        handlers::error_response(&ResultGateError::MethodNotAllowed)
    };
    stamp_headers(response.headers_mut());
    response
}

fn stamp_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
}

/// A panic payload becomes a 500 carrying its text; payloads that are not
/// strings get the generic message.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        Some(s.clone())
    } else {
        panic.downcast_ref::<&str>().map(|s| (*s).to_string())
    };
    handlers::error_response(&ResultGateError::Unhandled { message })
}

/// Bind the listener for `config.host:config.port`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ResultGateError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| ResultGateError::Server {
            message: format!("failed to bind {addr}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Serve on an already-bound listener until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), ResultGateError> {
    let app = build_router(state);

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("resultgate listening on {addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| ResultGateError::Server {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("resultgate stopped");
    Ok(())
}

/// Bind and serve.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), ResultGateError> {
    let listener = bind(config).await?;
    serve(listener, state, cancel).await
}
