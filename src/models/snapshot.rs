// Metrics collected for one rendering pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hosts per continent, as bucketed by `location.continent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalCounts {
    pub north_america: u64,
    pub europe: u64,
    pub asia: u64,
}

/// Hosts exposing services that are common initial-access vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureCounts {
    pub rdp: u64,
    pub smb: u64,
    pub telnet: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCount {
    pub name: String,
    pub count: u64,
}

/// Everything the dashboard shows. Built once per run, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_hosts: u64,
    pub regions: RegionalCounts,
    /// At most five entries, in API order.
    pub top_services: Vec<ServiceCount>,
    pub exposure: ExposureCounts,
    pub captured_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// Header timestamp, e.g. "2026-10-18 09:30 UTC".
    pub fn timestamp_label(&self) -> String {
        timestamp_label(self.captured_at)
    }

    /// Footer date, e.g. "18 Oct 2026".
    pub fn date_short(&self) -> String {
        self.captured_at.format("%d %b %Y").to_string()
    }
}

pub fn timestamp_label(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}
