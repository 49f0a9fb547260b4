// SPDX-FileCopyrightText: 2026 Resultgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock result API for deterministic testing.
//!
//! `MockResultSource` implements `ResultSource` with scripted outcomes and
//! records every query it receives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use resultgate_core::{ResultGateError, ResultQuery, ResultSource};

/// A mock result API.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// [`sample_result`] is returned.
pub struct MockResultSource {
    outcomes: Arc<Mutex<VecDeque<Result<Value, ResultGateError>>>>,
    queries: Arc<Mutex<Vec<ResultQuery>>>,
    panic_on_fetch: bool,
}

impl MockResultSource {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            panic_on_fetch: false,
        }
    }

    /// A mock pre-loaded with the given outcomes.
    pub fn with_outcomes(outcomes: Vec<Result<Value, ResultGateError>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from(outcomes))),
            ..Self::new()
        }
    }

    /// A mock whose first lookup answers with `record`.
    pub fn returning(record: Value) -> Self {
        Self::with_outcomes(vec![Ok(record)])
    }

    /// A mock whose first lookup reports the record as missing.
    pub fn not_found() -> Self {
        Self::with_outcomes(vec![Err(ResultGateError::UpstreamNotFound {
            message: "Result not found".to_string(),
        })])
    }

    /// A mock that panics inside `fetch_result`.
    pub fn panicking() -> Self {
        Self {
            panic_on_fetch: true,
            ..Self::new()
        }
    }

    /// Queue another outcome.
    pub async fn push(&self, outcome: Result<Value, ResultGateError>) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Every query received so far, in order.
    pub async fn queries(&self) -> Vec<ResultQuery> {
        self.queries.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.lock().await.len()
    }
}

impl Default for MockResultSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultSource for MockResultSource {
    fn name(&self) -> &str {
        "mock-results"
    }

    async fn fetch_result(&self, query: &ResultQuery) -> Result<Value, ResultGateError> {
        self.queries.lock().await.push(query.clone());
        if self.panic_on_fetch {
            panic!("mock result source panicked");
        }
        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(sample_result()))
    }
}

/// A plausible result record for roll 123456, serial 1234.
pub fn sample_result() -> Value {
    json!({
        "name": "Asha Roy",
        "ROll_No": "1234561234",
        "Reg_No": "REG1",
        "subjects": [
            {"code": "BNGA", "marks": 78},
            {"code": "ENGB", "marks": 81}
        ],
        "result": "PASS"
    })
}
