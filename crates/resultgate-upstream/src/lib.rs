// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest-backed implementations of the upstream source traits.
//!
//! [`ResultsClient`] talks to the board-exam result API and
//! [`PaymentStoreClient`] fetches the payment-record collection. Both share
//! one connection pool built by [`build_sources`].

pub mod payments;
pub mod results;

use std::sync::Arc;

use resultgate_config::UpstreamConfig;
use resultgate_core::{PaymentSource, ResultGateError, ResultSource};

pub use payments::PaymentStoreClient;
pub use results::ResultsClient;

/// Build both upstream clients from configuration.
pub fn build_sources(
    config: &UpstreamConfig,
) -> Result<(Arc<dyn ResultSource>, Arc<dyn PaymentSource>), ResultGateError> {
    let client = resultgate_security::build_upstream_client(config)?;
    let results = ResultsClient::new(client.clone(), &config.results_base_url)?;
    let payments = PaymentStoreClient::new(client, &config.payments_url)?;

    tracing::info!(
        results = %results.base_url(),
        payments = %payments.url(),
        "upstream clients ready"
    );
    Ok((Arc::new(results), Arc::new(payments)))
}
