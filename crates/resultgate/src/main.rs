// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! resultgate - exam-result gateway with payment verification.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use resultgate_config::{ConfigError, ResultGateConfig};

/// resultgate - exam-result gateway with payment verification.
#[derive(Parser, Debug)]
#[command(name = "resultgate", version, about, long_about = None)]
struct Cli {
    /// Load this TOML file instead of the standard hierarchy.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP server (the default).
    Serve,
    /// Load and validate configuration, then print a summary.
    CheckConfig,
}

fn load(path: Option<&Path>) -> Result<ResultGateConfig, Vec<ConfigError>> {
    match path {
        Some(path) => resultgate_config::load_and_validate_path(path),
        None => resultgate_config::load_and_validate(),
    }
}

fn config_summary(config: &ResultGateConfig) -> String {
    let keys: Vec<&str> = config.referral.buttons.keys().map(String::as_str).collect();
    format!(
        "listen: {}:{}\nresults API: {}\npayment store: {}\nreferral keys: {}\ndefault button: {}",
        config.server.host,
        config.server.port,
        upstream_host(&config.upstream.results_base_url),
        upstream_host(&config.upstream.payments_url),
        if keys.is_empty() {
            "(none)".to_string()
        } else {
            keys.join(", ")
        },
        config.referral.default_button_id,
    )
}

/// `host[:port]` of an upstream URL; paths and credentials are left out.
fn upstream_host(url: &str) -> String {
    resultgate_security::validate_url(url)
        .ok()
        .and_then(|parsed| {
            let host = parsed.host_str()?.to_string();
            Some(match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host,
            })
        })
        .unwrap_or_else(|| "<invalid>".to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            resultgate_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => {
            println!("configuration OK\n{}", config_summary(&config));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::parse_from(["resultgate"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["resultgate", "check-config", "--config", "/tmp/rg.toml"]);
        assert_eq!(cli.command, Some(Commands::CheckConfig));
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/rg.toml")));
    }

    #[test]
    fn summary_lists_hosts_and_keys() {
        let config = resultgate_config::load_and_validate_str(
            r#"
            [upstream]
            results_base_url = "https://results.example.test/api/result"
            payments_url = "https://user@store.example.test:8443/payments.json?x=1"
            "#,
        )
        .unwrap();
        let summary = config_summary(&config);
        assert!(summary.contains("results API: results.example.test"));
        assert!(summary.contains("payment store: store.example.test:8443"));
        assert!(summary.contains("referral keys: koyel"));
        assert!(summary.contains("default button: pl_QMXOuva67vyoan"));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let errors = load(Some(Path::new("/nonexistent/resultgate.toml"))).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
