// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source of payment records used for verification.

use async_trait::async_trait;

use crate::error::ResultGateError;
use crate::types::PaymentRecord;

/// Returns the complete payment-record collection.
///
/// Called once per verification; implementations must not cache.
#[async_trait]
pub trait PaymentSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch every record currently in the store, in store order.
    async fn fetch_records(&self) -> Result<Vec<PaymentRecord>, ResultGateError>;
}
