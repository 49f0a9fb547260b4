// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for resultgate integration tests.
//!
//! Provides mock upstreams and a request harness for fast, deterministic
//! tests without network access.
//!
//! # Components
//!
//! - [`MockResultSource`] - scripted result API with query recording
//! - [`MockPaymentSource`] - fixed payment-record store
//! - [`TestHarness`] - the real router driven in-process

pub mod harness;
pub mod mock_payments;
pub mod mock_results;

pub use harness::{TestHarness, TestHarnessBuilder, TestResponse};
pub use mock_payments::{MockPaymentSource, paid_by_email, paid_by_phone};
pub use mock_results::{MockResultSource, sample_result};
