// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Covers constraints serde cannot express: required upstream URLs, a
//! known log level, and a referral table without empty or colliding keys.

use std::collections::HashMap;

use crate::diagnostic::ConfigError;
use crate::model::ResultGateConfig;

/// Log levels accepted by `server.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &ResultGateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(validation("server.host must not be empty".to_string()));
    }

    if config.server.port == 0 {
        errors.push(validation("server.port must be greater than 0".to_string()));
    }

    let level = config.server.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(validation(format!(
            "server.log_level `{}` is not one of {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    check_url(
        "upstream.results_base_url",
        &config.upstream.results_base_url,
        &mut errors,
    );
    check_url(
        "upstream.payments_url",
        &config.upstream.payments_url,
        &mut errors,
    );

    if config.referral.default_button_id.trim().is_empty() {
        errors.push(validation(
            "referral.default_button_id must not be empty".to_string(),
        ));
    }

    let mut seen: HashMap<String, &str> = HashMap::new();
    for (key, button_id) in &config.referral.buttons {
        if key.trim().is_empty() {
            errors.push(validation(
                "referral.buttons contains an empty referral key".to_string(),
            ));
            continue;
        }
        if button_id.trim().is_empty() {
            errors.push(validation(format!(
                "referral.buttons.{key} must not be an empty button id"
            )));
        }
        let folded = key.trim().to_lowercase();
        if let Some(previous) = seen.insert(folded, key.as_str()) {
            errors.push(validation(format!(
                "referral.buttons keys `{previous}` and `{key}` collide when lowercased"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation(message: String) -> ConfigError {
    ConfigError::Validation { message }
}

fn check_url(key: &str, value: &str, errors: &mut Vec<ConfigError>) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(validation(format!(
            "{key} must be set (config file or RESULTGATE_{} env var)",
            key.replace('.', "_").to_ascii_uppercase()
        )));
        return;
    }

    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {}
        _ => errors.push(validation(format!(
            "{key} `{value}` is not an http(s) URL"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ResultGateConfig {
        let mut config = ResultGateConfig::default();
        config.upstream.results_base_url = "https://results.example.test/api/result".into();
        config.upstream.payments_url = "https://store.example.test/payments.json".into();
        config
    }

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_needs_upstream_urls() {
        let errors = validate_config(&ResultGateConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_message(&errors, "RESULTGATE_UPSTREAM_RESULTS_BASE_URL"));
        assert!(has_message(&errors, "RESULTGATE_UPSTREAM_PAYMENTS_URL"));
    }

    #[test]
    fn config_with_urls_validates() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn non_http_url_fails_validation() {
        let mut config = valid_config();
        config.upstream.payments_url = "ftp://store.example.test/payments".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "is not an http(s) URL"));
    }

    #[test]
    fn url_without_host_fails_validation() {
        let mut config = valid_config();
        config.upstream.results_base_url = "https:///api".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "upstream.results_base_url"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = valid_config();
        config.server.log_level = "verbose".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "server.log_level"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = valid_config();
        config.server.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut config = valid_config();
        config.server.port = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "server.port"));
    }

    #[test]
    fn empty_default_button_fails_validation() {
        let mut config = valid_config();
        config.referral.default_button_id = "  ".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "default_button_id"));
    }

    #[test]
    fn colliding_referral_keys_fail_validation() {
        let mut config = valid_config();
        config
            .referral
            .buttons
            .insert("Koyel".into(), "pl_other".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "collide when lowercased"));
    }

    #[test]
    fn empty_button_id_fails_validation() {
        let mut config = valid_config();
        config.referral.buttons.insert("promo".into(), "".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "referral.buttons.promo"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = ResultGateConfig::default();
        config.server.host = "".into();
        config.server.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
