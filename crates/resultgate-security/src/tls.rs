// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TLS policy for the result API and payment store connections.
//!
//! Remote upstreams must be HTTPS; loopback addresses are exempt so local
//! stubs and test servers work over plain HTTP.

use std::time::Duration;

use resultgate_config::UpstreamConfig;
use resultgate_core::ResultGateError;
use tracing::error;

/// Build the shared reqwest client used for both upstream services.
///
/// TLS 1.2 minimum. A timeout is applied only when `timeout_secs` is
/// non-zero; otherwise the caller's own request deadline is the ceiling.
pub fn build_upstream_client(config: &UpstreamConfig) -> Result<reqwest::Client, ResultGateError> {
    let mut builder = reqwest::Client::builder()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .user_agent(concat!("resultgate/", env!("CARGO_PKG_VERSION")));

    if config.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_secs));
    }

    builder.build().map_err(|e| {
        error!("failed to build upstream HTTP client: {e}");
        ResultGateError::Config(format!("failed to build upstream HTTP client: {e}"))
    })
}

/// Check an upstream URL against the TLS policy.
pub fn validate_url(url: &str) -> Result<reqwest::Url, ResultGateError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| ResultGateError::Config(format!("invalid upstream URL `{url}`: {e}")))?;

    let host = parsed.host_str().unwrap_or("");
    if is_localhost(host) {
        return Ok(parsed);
    }

    if parsed.scheme() != "https" {
        error!(url = %url, "TLS required for remote upstream");
        return Err(ResultGateError::Config(format!(
            "upstream URL `{url}` must use HTTPS"
        )));
    }

    Ok(parsed)
}

/// Check if a host refers to the loopback interface.
pub fn is_localhost(host: &str) -> bool {
    matches!(host, "::1" | "localhost" | "[::1]") || host.starts_with("127.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_without_timeout() {
        assert!(build_upstream_client(&UpstreamConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_timeout() {
        let config = UpstreamConfig {
            timeout_secs: 10,
            ..UpstreamConfig::default()
        };
        assert!(build_upstream_client(&config).is_ok());
    }

    #[test]
    fn https_remote_is_allowed() {
        let url = validate_url("https://results.example.test/api/result").unwrap();
        assert_eq!(url.host_str(), Some("results.example.test"));
    }

    #[test]
    fn http_remote_is_rejected() {
        let err = validate_url("http://results.example.test/api").unwrap_err();
        assert!(err.to_string().contains("must use HTTPS"));
    }

    #[test]
    fn http_loopback_is_allowed() {
        assert!(validate_url("http://127.0.0.1:8080/payments").is_ok());
        assert!(validate_url("http://localhost:3000/api").is_ok());
        assert!(validate_url("http://[::1]:8080/api").is_ok());
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn is_localhost_rejects_non_loopback() {
        assert!(!is_localhost("10.0.0.1"));
        assert!(!is_localhost("results.example.test"));
        assert!(is_localhost("127.0.0.2"));
    }
}
