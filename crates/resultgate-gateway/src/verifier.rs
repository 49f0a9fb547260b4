// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment verification against the payment-record store.

use tracing::{debug, info};

use resultgate_core::{PaymentRecord, PaymentSource, ResultGateError, VerificationRequest};
use resultgate_security::mask_identifier;

pub const VERIFICATION_FAILED_MESSAGE: &str =
    "Verification failed. No payment record matches the supplied details.";

/// Load the store and return the first record that proves payment for
/// `request`. Store errors propagate unchanged.
pub async fn verify_payment(
    payments: &dyn PaymentSource,
    request: &VerificationRequest,
) -> Result<PaymentRecord, ResultGateError> {
    let records = payments.fetch_records().await?;

    let mut matches = records.into_iter().filter(|r| r.matches(request));
    let Some(record) = matches.next() else {
        info!(
            source = payments.name(),
            roll = %request.query.roll,
            serial = %request.query.serial,
            identifier = %mask_identifier(&request.identifier),
            "payment verification failed"
        );
        return Err(ResultGateError::VerificationFailed {
            message: VERIFICATION_FAILED_MESSAGE.to_string(),
        });
    };

    let extra = matches.count();
    if extra > 0 {
        debug!(extra, "several payment records match; using the first");
    }
    debug!(roll = %request.query.roll, "payment verified");
    Ok(record)
}
