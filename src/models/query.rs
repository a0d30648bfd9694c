// Aggregate query, buckets and decoded results

use serde::{Deserialize, Serialize};

/// One aggregate request: search expression, grouping field and bucket limit.
/// Serializes to the JSON body the aggregate endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub query: String,
    pub field: String,
    pub num_buckets: u32,
}

impl Query {
    pub fn new(query: impl Into<String>, field: impl Into<String>, num_buckets: u32) -> Self {
        Self {
            query: query.into(),
            field: field.into(),
            num_buckets,
        }
    }
}

/// One (key, count) group returned by an aggregate query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub count: u64,
}

/// Decoded `result` object. Missing `total` / `buckets` read as zero / empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

impl AggregateResult {
    /// Count for `key`, or 0 when the key was not returned.
    /// A repeated key reads as its last bucket.
    pub fn count_for(&self, key: &str) -> u64 {
        self.buckets
            .iter()
            .rev()
            .find(|b| b.key == key)
            .map(|b| b.count)
            .unwrap_or(0)
    }
}
