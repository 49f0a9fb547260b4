// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request domain types.
//!
//! Nothing here is persisted. Values are built from one inbound request or
//! one upstream response and dropped when the request completes.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A validated board-exam lookup: six-digit roll, four-digit serial, and a
/// trimmed, non-empty registration number.
///
/// The gateway validator is the only producer of this type in the request
/// path, so downstream code relies on the field invariants without
/// rechecking them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultQuery {
    /// Six ASCII digits.
    pub roll: String,
    /// Four ASCII digits (the `no` field on the wire).
    pub serial: String,
    /// Registration number, already trimmed.
    pub registration: String,
}

impl ResultQuery {
    /// The full roll number used by the result API: roll followed by serial.
    pub fn roll_number(&self) -> String {
        format!("{}{}", self.roll, self.serial)
    }
}

/// A full-result request: the lookup plus the proof-of-payment token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub query: ResultQuery,
    /// Payment id, email, or phone. Trimmed, never empty.
    pub identifier: String,
}

/// One entry from the payment-record store.
///
/// The store is loosely typed: roll and serial are sometimes numbers,
/// sometimes strings, and the optional contact fields may be missing or
/// `null`. Everything is normalized to trimmed strings on the way in.
/// Several spellings exist for the serial and payment id; the first usable
/// one wins, so entries carrying two spellings still load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentRecord {
    pub roll: Option<String>,
    /// `no`, or `serial` in older entries.
    pub serial: Option<String>,
    /// `payment_id`, `paymentId` or `razorpay_payment_id`.
    pub payment_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

const SERIAL_KEYS: &[&str] = &["no", "serial"];
const PAYMENT_ID_KEYS: &[&str] = &["payment_id", "paymentId", "razorpay_payment_id"];

impl PaymentRecord {
    /// Build a record from one JSON object in the store.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            roll: first_of(map, &["roll"]),
            serial: first_of(map, SERIAL_KEYS),
            payment_id: first_of(map, PAYMENT_ID_KEYS),
            email: first_of(map, &["email"]),
            phone: first_of(map, &["phone"]),
        }
    }

    /// Returns true when this record proves payment for `request`.
    ///
    /// Roll and serial must match exactly. The identifier then has to equal
    /// the payment id or email ignoring case, or the phone exactly.
    pub fn matches(&self, request: &VerificationRequest) -> bool {
        let query = &request.query;
        if self.roll.as_deref() != Some(query.roll.as_str())
            || self.serial.as_deref() != Some(query.serial.as_str())
        {
            return false;
        }

        let identifier = request.identifier.trim();
        let lowered = identifier.to_lowercase();
        let eq_ignore_case =
            |field: &Option<String>| field.as_deref().is_some_and(|v| v.to_lowercase() == lowered);

        eq_ignore_case(&self.payment_id)
            || eq_ignore_case(&self.email)
            || self.phone.as_deref() == Some(identifier)
    }
}

impl<'de> Deserialize<'de> for PaymentRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(&map))
    }
}

fn first_of(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(loose_string))
}

/// A JSON string or number as trimmed text; anything else (null, bool,
/// object, array) is `None`.
fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The three fields the details flow lifts out of an upstream result record.
///
/// Values are forwarded with whatever JSON type the result API used. A field
/// the upstream omitted (or sent as `null`) stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsSummary {
    pub name: Option<Value>,
    /// Upstream `ROll_No`.
    pub roll_no: Option<Value>,
    /// Upstream `Reg_No`.
    pub reg_no: Option<Value>,
}

impl DetailsSummary {
    /// Extract the summary fields from an upstream result record.
    pub fn from_record(record: &Value) -> Self {
        let field = |key: &str| record.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            name: field("name"),
            roll_no: field("ROll_No"),
            reg_no: field("Reg_No"),
        }
    }

    /// Upstream field names that were absent from the record.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.roll_no.is_none() {
            missing.push("ROll_No");
        }
        if self.reg_no.is_none() {
            missing.push("Reg_No");
        }
        missing
    }
}
