// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security helpers for resultgate.
//!
//! Builds the outbound HTTP client under a TLS policy and keeps
//! verification identifiers (emails, phones, payment ids) out of logs.

pub mod redact;
pub mod tls;

pub use redact::{RedactingWriter, mask_identifier, redact};
pub use tls::{build_upstream_client, is_localhost, validate_url};
