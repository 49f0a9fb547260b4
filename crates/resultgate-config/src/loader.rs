// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Merge order (later overrides earlier): compiled defaults,
//! `/etc/resultgate/resultgate.toml`, `~/.config/resultgate/resultgate.toml`,
//! `./resultgate.toml`, then `RESULTGATE_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ResultGateConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/resultgate/resultgate.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "resultgate.toml";

/// Top-level sections, used to turn `RESULTGATE_SERVER_LOG_LEVEL` into
/// `server.log_level`.
const SECTIONS: &[&str] = &["server", "upstream", "referral"];

/// Path of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("resultgate").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<ResultGateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ResultGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ResultGateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ResultGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ResultGateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ResultGateConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `RESULTGATE_*` provider mapping the first underscore after a known
/// section name to a dot. `Env::split("_")` would break keys such as
/// `results_base_url`.
fn env_provider() -> Env {
    Env::prefixed("RESULTGATE_")
        .map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Map a lowercased, prefix-stripped env key to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("server_port"), "server.port");
        assert_eq!(map_env_key("server_log_level"), "server.log_level");
        assert_eq!(
            map_env_key("upstream_results_base_url"),
            "upstream.results_base_url"
        );
        assert_eq!(
            map_env_key("referral_default_button_id"),
            "referral.default_button_id"
        );
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("something_else"), "something_else");
    }

    #[test]
    fn user_config_path_ends_with_file_name() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("resultgate/resultgate.toml"));
        }
    }
}
