// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock payment-record store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use resultgate_core::{PaymentRecord, PaymentSource, ResultGateError};

type ErrorFactory = Arc<dyn Fn() -> ResultGateError + Send + Sync>;

/// A mock payment store returning a fixed record list, or a fixed error.
pub struct MockPaymentSource {
    records: Vec<PaymentRecord>,
    error: Option<ErrorFactory>,
    calls: AtomicUsize,
}

impl MockPaymentSource {
    /// An empty store: every verification fails with 403.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<PaymentRecord>) -> Self {
        Self {
            records,
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A store whose every fetch fails with the error `make` builds.
    pub fn failing(make: impl Fn() -> ResultGateError + Send + Sync + 'static) -> Self {
        Self {
            records: Vec::new(),
            error: Some(Arc::new(make)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the store was read.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockPaymentSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentSource for MockPaymentSource {
    fn name(&self) -> &str {
        "mock-payments"
    }

    async fn fetch_records(&self) -> Result<Vec<PaymentRecord>, ResultGateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(make) => Err(make()),
            None => Ok(self.records.clone()),
        }
    }
}

/// A paid record for `roll`/`serial` reachable by email.
pub fn paid_by_email(roll: &str, serial: &str, email: &str) -> PaymentRecord {
    PaymentRecord {
        roll: Some(roll.to_string()),
        serial: Some(serial.to_string()),
        email: Some(email.to_string()),
        ..PaymentRecord::default()
    }
}

/// A paid record for `roll`/`serial` reachable by phone and payment id.
pub fn paid_by_phone(roll: &str, serial: &str, phone: &str, payment_id: &str) -> PaymentRecord {
    PaymentRecord {
        roll: Some(roll.to_string()),
        serial: Some(serial.to_string()),
        phone: Some(phone.to_string()),
        payment_id: Some(payment_id.to_string()),
        ..PaymentRecord::default()
    }
}
