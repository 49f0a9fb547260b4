// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request body validation for both flows.
//!
//! Bodies are parsed here rather than through axum's `Json` extractor so
//! that malformed JSON yields the same `{message}` envelope as every other
//! failure. Checks run roll, serial, registration, identifier; the first
//! failure is reported.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use resultgate_core::{ResultGateError, ResultQuery, VerificationRequest};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body.";
pub const INVALID_ROLL_MESSAGE: &str = "Invalid roll number. It must be exactly 6 digits.";
pub const INVALID_SERIAL_MESSAGE: &str =
    "Invalid serial number (no). It must be exactly 4 digits.";
pub const MISSING_REGISTRATION_MESSAGE: &str = "Registration number is required.";
pub const MISSING_IDENTIFIER_MESSAGE: &str =
    "Identifier (payment ID, email, or phone) is required.";

// ASCII only; `\d` would also accept other Unicode digits.
static ROLL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
static SERIAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

/// A validated `/api/details` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsInput {
    pub query: ResultQuery,
    /// `referralKey` as sent, if it was a string.
    pub referral_key: Option<String>,
}

/// Validate a `/api/details` body.
pub fn parse_details(body: &[u8]) -> Result<DetailsInput, ResultGateError> {
    let fields = parse_object(body)?;
    let query = parse_query(&fields)?;
    let referral_key = fields
        .get("referralKey")
        .and_then(Value::as_str)
        .map(str::to_string);
    Ok(DetailsInput {
        query,
        referral_key,
    })
}

/// Validate a `/api/full-result` body.
pub fn parse_full_result(body: &[u8]) -> Result<VerificationRequest, ResultGateError> {
    let fields = parse_object(body)?;
    let query = parse_query(&fields)?;
    let identifier = text_field(&fields, "identifier")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ResultGateError::malformed(MISSING_IDENTIFIER_MESSAGE))?;
    Ok(VerificationRequest { query, identifier })
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ResultGateError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(ResultGateError::malformed(INVALID_JSON_MESSAGE)),
    }
}

fn parse_query(fields: &Map<String, Value>) -> Result<ResultQuery, ResultGateError> {
    let roll = text_field(fields, "roll")
        .filter(|r| ROLL_PATTERN.is_match(r))
        .ok_or_else(|| ResultGateError::malformed(INVALID_ROLL_MESSAGE))?;

    let serial = text_field(fields, "no")
        .filter(|s| SERIAL_PATTERN.is_match(s))
        .ok_or_else(|| ResultGateError::malformed(INVALID_SERIAL_MESSAGE))?;

    let registration = fields
        .get("registration")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ResultGateError::malformed(MISSING_REGISTRATION_MESSAGE))?
        .to_string();

    Ok(ResultQuery {
        roll,
        serial,
        registration,
    })
}

/// A string field, or an integer field rendered in decimal.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details(value: Value) -> Result<DetailsInput, ResultGateError> {
        parse_details(value.to_string().as_bytes())
    }

    fn full(value: Value) -> Result<VerificationRequest, ResultGateError> {
        parse_full_result(value.to_string().as_bytes())
    }

    fn message(err: ResultGateError) -> String {
        assert_eq!(err.status_code(), 400);
        err.public_message()
    }

    #[test]
    fn valid_details_body() {
        let input = details(json!({
            "roll": "123456", "no": "1234", "registration": "  REG1 ", "referralKey": "koyel"
        }))
        .unwrap();
        assert_eq!(input.query.roll, "123456");
        assert_eq!(input.query.serial, "1234");
        assert_eq!(input.query.registration, "REG1");
        assert_eq!(input.referral_key.as_deref(), Some("koyel"));
    }

    #[test]
    fn non_string_referral_key_is_ignored() {
        let input = details(json!({
            "roll": "123456", "no": "1234", "registration": "REG1", "referralKey": 7
        }))
        .unwrap();
        assert!(input.referral_key.is_none());
    }

    #[test]
    fn integer_roll_and_serial_are_accepted() {
        let input = details(json!({"roll": 123456, "no": 1234, "registration": "REG1"})).unwrap();
        assert_eq!(input.query.roll_number(), "1234561234");
    }

    #[test]
    fn malformed_json_is_rejected_first() {
        let err = parse_details(b"{\"roll\": ").unwrap_err();
        assert_eq!(message(err), INVALID_JSON_MESSAGE);
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert_eq!(message(parse_details(b"[]").unwrap_err()), INVALID_JSON_MESSAGE);
        assert_eq!(message(parse_full_result(b"null").unwrap_err()), INVALID_JSON_MESSAGE);
    }

    #[test]
    fn bad_rolls_are_rejected() {
        for roll in [json!("12345"), json!("1234567"), json!("12a456"), json!(" 123456"),
            json!("١٢٣٤٥٦"), json!(12345.0), json!(null)]
        {
            let err = details(json!({"roll": roll, "no": "1234", "registration": "REG1"}))
                .unwrap_err();
            assert_eq!(message(err), INVALID_ROLL_MESSAGE, "roll {roll}");
        }
    }

    #[test]
    fn bad_serials_are_rejected() {
        for no in [json!("123"), json!("12345"), json!("12b4"), json!(true)] {
            let err = details(json!({"roll": "123456", "no": no, "registration": "REG1"}))
                .unwrap_err();
            assert_eq!(message(err), INVALID_SERIAL_MESSAGE, "no {no}");
        }
    }

    #[test]
    fn missing_fields_report_roll_first() {
        let err = details(json!({})).unwrap_err();
        assert_eq!(message(err), INVALID_ROLL_MESSAGE);
    }

    #[test]
    fn blank_registration_is_rejected() {
        for registration in [json!("   "), json!(""), json!(42), json!(null)] {
            let err = details(json!({"roll": "123456", "no": "1234", "registration": registration}))
                .unwrap_err();
            assert_eq!(message(err), MISSING_REGISTRATION_MESSAGE);
        }
    }

    #[test]
    fn valid_full_result_body() {
        let request = full(json!({
            "identifier": " Test@X.com ", "roll": "123456", "no": "1234", "registration": "REG1"
        }))
        .unwrap();
        assert_eq!(request.identifier, "Test@X.com");
        assert_eq!(request.query.registration, "REG1");
    }

    #[test]
    fn numeric_identifier_is_accepted() {
        let request = full(json!({
            "identifier": 9876543210u64, "roll": "123456", "no": "1234", "registration": "REG1"
        }))
        .unwrap();
        assert_eq!(request.identifier, "9876543210");
    }

    #[test]
    fn missing_or_blank_identifier_is_rejected() {
        for identifier in [json!(null), json!(""), json!("   ")] {
            let err = full(json!({
                "identifier": identifier, "roll": "123456", "no": "1234", "registration": "REG1"
            }))
            .unwrap_err();
            assert_eq!(message(err), MISSING_IDENTIFIER_MESSAGE);
        }
    }

    #[test]
    fn full_result_validates_roll_before_identifier() {
        let err = full(json!({"roll": "12", "no": "1234", "registration": "REG1"})).unwrap_err();
        assert_eq!(message(err), INVALID_ROLL_MESSAGE);
    }
}
