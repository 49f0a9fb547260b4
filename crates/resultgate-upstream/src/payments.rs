// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the payment-record store.
//!
//! The store is a single URL returning every record as a JSON array. It is
//! read in full on every verification with cache-busting headers so a
//! payment made seconds ago is visible.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, CACHE_CONTROL, EXPIRES, PRAGMA};
use serde_json::Value;
use tracing::{debug, warn};

use resultgate_core::{PaymentRecord, PaymentSource, ResultGateError};

/// Reported when the store answers with a non-success status.
pub const STORE_UNAVAILABLE_MESSAGE: &str =
    "Could not verify details (DB error). Please try again later.";

/// Reported when the store answers with JSON that is not an array.
pub const STORE_FORMAT_MESSAGE: &str = "Payment data format error.";

/// Reported when the store cannot be reached or its body is not JSON.
pub const VERIFICATION_ERROR_MESSAGE: &str = "Error during payment verification.";

/// HTTP client for the payment-record store.
#[derive(Debug, Clone)]
pub struct PaymentStoreClient {
    client: reqwest::Client,
    url: Url,
}

impl PaymentStoreClient {
    /// Create a client for the collection at `url`.
    pub fn new(client: reqwest::Client, url: &str) -> Result<Self, ResultGateError> {
        let url = resultgate_security::validate_url(url)?;
        Ok(Self { client, url })
    }

    /// The configured collection URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PaymentSource for PaymentStoreClient {
    fn name(&self) -> &str {
        "payment-store"
    }

    async fn fetch_records(&self) -> Result<Vec<PaymentRecord>, ResultGateError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(PRAGMA, "no-cache")
            .header(EXPIRES, "0")
            .send()
            .await
            .map_err(verification_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "payment store returned an error");
            return Err(ResultGateError::UpstreamUnavailable {
                status: 503,
                message: STORE_UNAVAILABLE_MESSAGE.to_string(),
                source: None,
            });
        }

        let body = response.text().await.map_err(verification_error)?;
        let parsed: Value = serde_json::from_str(&body).map_err(verification_error)?;

        let Value::Array(items) = parsed else {
            warn!("payment store body is not an array");
            return Err(ResultGateError::UpstreamData {
                message: STORE_FORMAT_MESSAGE.to_string(),
            });
        };

        let total = items.len();
        let records: Vec<PaymentRecord> = items
            .iter()
            .filter_map(|item| item.as_object().map(PaymentRecord::from_map))
            .collect();

        if records.len() != total {
            warn!(
                skipped = total - records.len(),
                "ignored payment entries that are not objects"
            );
        }
        debug!(count = records.len(), "payment records loaded");
        Ok(records)
    }
}

fn verification_error(e: impl std::error::Error + Send + Sync + 'static) -> ResultGateError {
    warn!(error = %e, "payment store request failed");
    ResultGateError::UpstreamUnavailable {
        status: 500,
        message: VERIFICATION_ERROR_MESSAGE.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PaymentStoreClient {
        PaymentStoreClient::new(
            reqwest::Client::new(),
            &format!("{}/payments.json", server.uri()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_records_sends_cache_busting_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments.json"))
            .and(header("cache-control", "no-cache, no-store, must-revalidate"))
            .and(header("pragma", "no-cache"))
            .and(header("expires", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server).fetch_records().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn fetch_records_parses_mixed_types() {
        let server = MockServer::start().await;
        let body = json!([
            {"roll": 123456, "no": "1234", "email": "a@b.co"},
            {"roll": "654321", "no": 4321, "phone": "9876543210", "payment_id": "pay_X1"},
        ]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let records = client_for(&server).fetch_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].roll.as_deref(), Some("123456"));
        assert_eq!(records[1].serial.as_deref(), Some("4321"));
        assert_eq!(records[1].payment_id.as_deref(), Some("pay_X1"));
    }

    #[tokio::test]
    async fn fetch_records_skips_non_object_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                "junk",
                42,
                {"roll": "123456", "no": "1234"}
            ])))
            .mount(&server)
            .await;

        let records = client_for(&server).fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn fetch_records_keeps_entries_with_duplicate_spellings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "roll": "123456",
                "no": "1234",
                "serial": "1234",
                "payment_id": "pay_ABC",
                "razorpay_payment_id": "pay_ABC",
                "email": "test@x.com"
            }])))
            .mount(&server)
            .await;

        let records = client_for(&server).fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].serial.as_deref(), Some("1234"));
        assert_eq!(records[0].payment_id.as_deref(), Some("pay_ABC"));
        assert_eq!(records[0].email.as_deref(), Some("test@x.com"));
    }

    #[tokio::test]
    async fn non_success_status_is_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_records().await.unwrap_err();
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.public_message(), STORE_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn object_body_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"records": []})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_records().await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), STORE_FORMAT_MESSAGE);
    }

    #[tokio::test]
    async fn invalid_json_is_verification_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_records().await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), VERIFICATION_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn connection_failure_is_verification_error() {
        let client =
            PaymentStoreClient::new(reqwest::Client::new(), "http://127.0.0.1:1/payments")
                .unwrap();
        let err = client.fetch_records().await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), VERIFICATION_ERROR_MESSAGE);
    }
}
