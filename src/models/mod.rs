// Domain models: aggregate queries/results and the dashboard snapshot

mod query;
mod snapshot;

pub use query::{AggregateResult, Bucket, Query};
pub use snapshot::{ExposureCounts, MetricsSnapshot, RegionalCounts, ServiceCount, timestamp_label};
