// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP front end for resultgate.
//!
//! Two flows share one router. `/api/details` validates the lookup,
//! picks a payment button from the referral table and returns a summary of
//! the result record. `/api/full-result` validates, checks the caller has
//! paid, and forwards the whole record. Upstream access goes through the
//! [`ResultSource`](resultgate_core::ResultSource) and
//! [`PaymentSource`](resultgate_core::PaymentSource) traits so tests can
//! swap in mocks.

pub mod handlers;
pub mod referral;
pub mod server;
pub mod validation;
pub mod verifier;

pub use handlers::{DetailsResponse, ErrorResponse, FULL_RESULT_REMAP_MESSAGE};
pub use referral::ReferralResolver;
pub use server::{GatewayState, bind, build_router, serve, start_server};
pub use verifier::{VERIFICATION_FAILED_MESSAGE, verify_payment};
