// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `resultgate serve`: tracing setup, upstream wiring, and the server loop.

use std::sync::Arc;

use resultgate_config::ResultGateConfig;
use resultgate_core::ResultGateError;
use resultgate_gateway::{GatewayState, ReferralResolver};
use resultgate_security::RedactingWriter;
use tracing::info;

use crate::shutdown;

/// Run the server until SIGINT or SIGTERM.
pub async fn run_serve(config: ResultGateConfig) -> Result<(), ResultGateError> {
    init_tracing(&config.server.log_level);

    let (results, payments) = resultgate_upstream::build_sources(&config.upstream)?;
    let referral = ReferralResolver::from_config(&config.referral);
    info!(
        referral_keys = referral.len(),
        default_button = referral.default_button_id(),
        "referral table loaded"
    );

    let state = GatewayState {
        results,
        payments,
        referral: Arc::new(referral),
    };

    let cancel = shutdown::install_signal_handler();
    resultgate_gateway::start_server(&config.server, state, cancel).await
}

/// Initialize the global subscriber. `RUST_LOG` overrides the configured
/// level. Output passes through [`RedactingWriter`] so identifiers that
/// reach a log line are masked.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(|| RedactingWriter::new(std::io::stderr()))
        .init();
}

fn default_directives(log_level: &str) -> String {
    let level = log_level.to_ascii_lowercase();
    // Target matching is by prefix, so `resultgate` also covers the
    // resultgate_* library crates.
    format!("resultgate={level},tower_http={level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_lowercase_the_level() {
        let directives = default_directives("DEBUG");
        assert_eq!(directives, "resultgate=debug,tower_http=debug,warn");
        assert!(tracing_subscriber::EnvFilter::try_new(&directives).is_ok());
    }
}
