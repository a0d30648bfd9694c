// Metrics collection: six aggregate calls, strictly sequential, assembled into one snapshot.
// A failed call zeroes only its own metric.

use crate::censys_repo::{AggregateOutcome, CensysRepo};
use crate::config::{CensysConfig, Credentials};
use crate::models::{
    AggregateResult, ExposureCounts, MetricsSnapshot, Query, RegionalCounts, ServiceCount,
};
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

/// Every host with at least one identified service.
pub const ANY_SERVICE_QUERY: &str = "services.service_name: *";
pub const CONTINENT_FIELD: &str = "location.continent";
pub const SERVICE_NAME_FIELD: &str = "services.service_name";

const CONTINENT_BUCKETS: u32 = 10;
pub const TOP_SERVICES_LIMIT: usize = 5;

const NORTH_AMERICA: &str = "North America";
const EUROPE: &str = "Europe";
const ASIA: &str = "Asia";

const RDP_QUERY: &str = "services.service_name: RDP";
const SMB_QUERY: &str = "services.service_name: SMB";
const TELNET_QUERY: &str = "services.service_name: TELNET";

/// Number of aggregate calls one `collect` makes.
pub const QUERIES_PER_COLLECTION: usize = 6;

pub struct Collector {
    repo: CensysRepo,
}

impl Collector {
    pub fn new(repo: CensysRepo) -> Self {
        Self { repo }
    }

    pub fn from_config(config: &CensysConfig, credentials: Credentials) -> anyhow::Result<Self> {
        Ok(Self::new(CensysRepo::new(config, credentials)?))
    }

    /// Runs the six queries and stamps the snapshot with the current time.
    pub async fn collect(&self) -> MetricsSnapshot {
        self.collect_at(Utc::now()).await
    }

    #[instrument(skip(self), fields(operation = "collect"))]
    pub async fn collect_at(&self, captured_at: DateTime<Utc>) -> MetricsSnapshot {
        info!("Fetching global host metrics from Censys");
        let mut failed = 0usize;
        let mut take = |outcome: AggregateOutcome| -> AggregateResult {
            if outcome.is_failed() {
                failed += 1;
            }
            outcome.into_result()
        };

        let total = take(self.repo.total_hosts(ANY_SERVICE_QUERY).await);
        let regions = take(
            self.repo
                .aggregate(&Query::new(
                    ANY_SERVICE_QUERY,
                    CONTINENT_FIELD,
                    CONTINENT_BUCKETS,
                ))
                .await,
        );
        let services = take(
            self.repo
                .aggregate(&Query::new(
                    ANY_SERVICE_QUERY,
                    SERVICE_NAME_FIELD,
                    TOP_SERVICES_LIMIT as u32,
                ))
                .await,
        );
        let rdp = take(self.repo.total_hosts(RDP_QUERY).await);
        let smb = take(self.repo.total_hosts(SMB_QUERY).await);
        let telnet = take(self.repo.total_hosts(TELNET_QUERY).await);

        info!(
            failed_queries = failed,
            total_queries = QUERIES_PER_COLLECTION,
            "Censys collection finished"
        );

        build_snapshot(
            &total,
            &regions,
            services,
            ExposureCounts {
                rdp: rdp.total,
                smb: smb.total,
                telnet: telnet.total,
            },
            captured_at,
        )
    }
}

fn build_snapshot(
    total: &AggregateResult,
    regions: &AggregateResult,
    services: AggregateResult,
    exposure: ExposureCounts,
    captured_at: DateTime<Utc>,
) -> MetricsSnapshot {
    let top_services = services
        .buckets
        .into_iter()
        .take(TOP_SERVICES_LIMIT)
        .map(|b| ServiceCount {
            name: b.key,
            count: b.count,
        })
        .collect();
    MetricsSnapshot {
        total_hosts: total.total,
        regions: RegionalCounts {
            north_america: regions.count_for(NORTH_AMERICA),
            europe: regions.count_for(EUROPE),
            asia: regions.count_for(ASIA),
        },
        top_services,
        exposure,
        captured_at,
    }
}
