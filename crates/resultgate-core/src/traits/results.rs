// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source of board-exam result records.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ResultGateError;
use crate::types::ResultQuery;

/// Looks up one result record by roll, serial, and registration.
///
/// Implementations report a missing record as
/// [`ResultGateError::UpstreamNotFound`] and any other non-success upstream
/// status as [`ResultGateError::UpstreamStatus`], so the full-result flow
/// can tell the two apart.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the record as opaque JSON.
    async fn fetch_result(&self, query: &ResultQuery) -> Result<Value, ResultGateError>;
}
