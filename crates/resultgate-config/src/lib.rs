// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for resultgate.
//!
//! TOML files in a fixed hierarchy plus `RESULTGATE_*` environment
//! overrides, merged by Figment, rejected on unknown keys, then checked for
//! semantic problems. Errors render as miette diagnostics.
//!
//! ```no_run
//! use resultgate_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ReferralConfig, ResultGateConfig, ServerConfig, UpstreamConfig};

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<ResultGateConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!("configuration loaded from standard hierarchy");
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<ResultGateConfig, Vec<ConfigError>> {
    if !path.exists() {
        return Err(vec![ConfigError::Other(format!(
            "config file {} does not exist",
            path.display()
        ))]);
    }

    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<ResultGateConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read whichever hierarchy files exist so diagnostics can show spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG_PATH)];
    if let Some(user) = loader::user_config_path() {
        candidates.push(user);
    }
    candidates.push(
        std::env::current_dir()
            .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
            .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into()),
    );

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
