// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redaction of verification identifiers in log output.
//!
//! Two mechanisms:
//! 1. [`mask_identifier`] for a value known to be an identifier, keeping
//!    just enough of it to correlate log lines.
//! 2. [`redact`] / [`RedactingWriter`] for free text (upstream error bodies,
//!    formatted log lines) that may contain emails, phones, or payment ids.

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;

const REDACTED: &str = "[REDACTED]";

/// Patterns that look like verification identifiers, each with its
/// replacement text.
static IDENTIFIER_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Email addresses.
        (
            Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap(),
            REDACTED,
        ),
        // Razorpay-style payment ids: pay_XXXXXXXXXXXXXX
        (Regex::new(r"\bpay_[A-Za-z0-9]{8,}\b").unwrap(), REDACTED),
        // Phone numbers: optional +, 10 to 13 digits. A run that opens a URL
        // path segment is a roll number (`/result/1234561234/..`), not a phone.
        (
            Regex::new(r"(?P<lead>^|[^/])\+?\b\d{10,13}\b").unwrap(),
            "${lead}[REDACTED]",
        ),
    ]
});

/// Mask an identifier for structured log fields.
///
/// Emails keep their first character and domain (`t***@x.com`); anything
/// else keeps its last four characters (`***3210`). Values of four
/// characters or fewer are hidden entirely.
pub fn mask_identifier(identifier: &str) -> String {
    let identifier = identifier.trim();
    if let Some((local, domain)) = identifier.split_once('@')
        && let Some(first) = local.chars().next()
    {
        return format!("{first}***@{domain}");
    }

    let count = identifier.chars().count();
    if count <= 4 {
        return "***".to_string();
    }
    let tail: String = identifier.chars().skip(count - 4).collect();
    format!("***{tail}")
}

/// Replace anything that looks like an identifier with `[REDACTED]`.
pub fn redact(input: &str) -> String {
    IDENTIFIER_PATTERNS
        .iter()
        .fold(input.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

/// A writer that runs [`redact`] over everything written through it.
///
/// Used as the tracing-subscriber writer so that identifiers interpolated
/// into log messages never reach the log sink.
pub struct RedactingWriter<W> {
    inner: W,
}

impl<W: Write> RedactingWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        self.inner.write_all(redact(&input).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
