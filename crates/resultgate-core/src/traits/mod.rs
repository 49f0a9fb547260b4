// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams between the gateway flows and the upstream services.
//!
//! Both traits use `#[async_trait]` so the gateway can hold them as
//! `Arc<dyn ...>` and tests can swap in mocks.

pub mod payments;
pub mod results;

pub use payments::PaymentSource;
pub use results::ResultSource;
