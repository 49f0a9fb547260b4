// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for resultgate.
//!
//! Holds the error type every crate returns, the per-request domain types,
//! and the traits the gateway uses to reach its two upstream services.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{GENERIC_FAILURE_MESSAGE, ResultGateError};
pub use traits::{PaymentSource, ResultSource};
pub use types::{DetailsSummary, PaymentRecord, ResultQuery, VerificationRequest};
