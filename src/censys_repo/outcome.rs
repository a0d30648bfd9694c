// Result of one aggregate call: observed data, or a failure that reads as empty

use crate::models::{AggregateResult, Bucket};

/// Longest response body kept on a status error.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Censys API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed aggregate response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AggregateError {
    pub(super) fn status(status: u16, body: &str) -> Self {
        AggregateError::Status {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }
}

/// A failed call reads exactly like an empty result (total 0, no buckets), so a
/// single bad sub-query never aborts a collection pass. `is_failed` keeps the
/// difference visible to callers that need it.
#[derive(Debug)]
pub enum AggregateOutcome {
    Observed(AggregateResult),
    Failed(AggregateError),
}

static EMPTY: AggregateResult = AggregateResult {
    total: 0,
    buckets: Vec::new(),
};

impl AggregateOutcome {
    pub fn result(&self) -> &AggregateResult {
        match self {
            AggregateOutcome::Observed(r) => r,
            AggregateOutcome::Failed(_) => &EMPTY,
        }
    }

    pub fn total(&self) -> u64 {
        self.result().total
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.result().buckets
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AggregateOutcome::Failed(_))
    }

    pub fn into_result(self) -> AggregateResult {
        match self {
            AggregateOutcome::Observed(r) => r,
            AggregateOutcome::Failed(_) => AggregateResult::default(),
        }
    }
}
