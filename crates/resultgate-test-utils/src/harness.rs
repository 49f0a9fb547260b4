// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for in-process gateway testing.
//!
//! `TestHarness` builds the real router over mock upstreams and drives it
//! with `tower::ServiceExt::oneshot`, so no socket is opened.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use resultgate_config::ReferralConfig;
use resultgate_gateway::{GatewayState, ReferralResolver, build_router};

use crate::mock_payments::MockPaymentSource;
use crate::mock_results::MockResultSource;

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    results: MockResultSource,
    payments: MockPaymentSource,
    referral: ReferralConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            results: MockResultSource::new(),
            payments: MockPaymentSource::new(),
            referral: ReferralConfig::default(),
        }
    }

    pub fn with_results(mut self, results: MockResultSource) -> Self {
        self.results = results;
        self
    }

    pub fn with_payments(mut self, payments: MockPaymentSource) -> Self {
        self.payments = payments;
        self
    }

    /// Replace the built-in referral table.
    pub fn with_referral(mut self, referral: ReferralConfig) -> Self {
        self.referral = referral;
        self
    }

    pub fn build(self) -> TestHarness {
        let results = Arc::new(self.results);
        let payments = Arc::new(self.payments);
        let state = GatewayState {
            results: results.clone(),
            payments: payments.clone(),
            referral: Arc::new(ReferralResolver::from_config(&self.referral)),
        };
        TestHarness {
            router: build_router(state),
            results,
            payments,
        }
    }
}

/// The gateway router wired to mock upstreams.
pub struct TestHarness {
    router: Router,
    /// The result API mock, for inspecting recorded queries.
    pub results: Arc<MockResultSource>,
    /// The payment store mock, for inspecting call counts.
    pub payments: Arc<MockPaymentSource>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// POST `body` as JSON to `path`.
    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, path, &body.to_string()).await
    }

    /// Send a raw request through the router.
    pub async fn request(&self, method: Method, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("test request is well formed");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("response body is readable")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// A fully buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// The body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// The `message` field of an error envelope.
    pub fn message(&self) -> String {
        self.json()["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Value of `name` as a string, or empty if absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}
