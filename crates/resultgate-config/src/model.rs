// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for resultgate.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level resultgate configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResultGateConfig {
    /// Listener and logging settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Result API and payment store endpoints.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Referral key to payment-button mapping.
    #[serde(default)]
    pub referral: ReferralConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Downstream service endpoints.
///
/// Both URLs have no usable default and must be supplied by a config file
/// or `RESULTGATE_UPSTREAM_*` variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base of the result API. Requests go to `{base}/{roll}{serial}/{registration}`.
    #[serde(default)]
    pub results_base_url: String,

    /// URL returning the full payment-record collection as a JSON array.
    #[serde(default)]
    pub payments_url: String,

    /// Per-request timeout in seconds. `0` leaves requests unbounded.
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Referral attribution settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReferralConfig {
    /// Button id used when the referral key is absent or unknown.
    #[serde(default = "default_button_id")]
    pub default_button_id: String,

    /// Referral key to button id. Keys are matched case-insensitively.
    #[serde(default = "default_buttons")]
    pub buttons: BTreeMap<String, String>,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            default_button_id: default_button_id(),
            buttons: default_buttons(),
        }
    }
}

fn default_button_id() -> String {
    "pl_QMXOuva67vyoan".to_string()
}

fn default_buttons() -> BTreeMap<String, String> {
    BTreeMap::from([("koyel".to_string(), "pl_QMWdxwIPVZYTpi".to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces() {
        let config = ResultGateConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_level, "info");
    }

    #[test]
    fn upstream_urls_default_to_empty() {
        let config = UpstreamConfig::default();
        assert!(config.results_base_url.is_empty());
        assert!(config.payments_url.is_empty());
        assert_eq!(config.timeout_secs, 0);
    }

    #[test]
    fn builtin_referral_table() {
        let config = ReferralConfig::default();
        assert_eq!(config.default_button_id, "pl_QMXOuva67vyoan");
        assert_eq!(
            config.buttons.get("koyel").map(String::as_str),
            Some("pl_QMWdxwIPVZYTpi")
        );
    }
}
