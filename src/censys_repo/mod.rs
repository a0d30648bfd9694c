// Censys hosts aggregate API via reqwest

mod outcome;

pub use outcome::{AggregateError, AggregateOutcome};

use crate::config::{CensysConfig, Credentials};
use crate::models::{AggregateResult, Query};
use reqwest::{Client, Url};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Grouping field for "how many hosts match" reads; only `result.total` is used.
pub const TOTAL_FIELD: &str = "location.country_code";

#[derive(Debug, Deserialize)]
struct AggregateEnvelope {
    #[serde(default)]
    result: AggregateResult,
}

pub struct CensysRepo {
    http: Client,
    aggregate_url: Url,
    credentials: Credentials,
}

impl CensysRepo {
    pub fn new(config: &CensysConfig, credentials: Credentials) -> anyhow::Result<Self> {
        let aggregate_url = Url::parse(&config.aggregate_url).map_err(|e| {
            anyhow::anyhow!("censys.aggregate_url {:?}: {}", config.aggregate_url, e)
        })?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(crate::version::user_agent())
            .build()?;
        Ok(Self {
            http,
            aggregate_url,
            credentials,
        })
    }

    /// One POST to the aggregate endpoint. Never returns an error: transport
    /// failures, non-success statuses and undecodable bodies are logged and
    /// come back as `AggregateOutcome::Failed`.
    #[instrument(
        skip(self, query),
        fields(repo = "censys", operation = "aggregate", field = %query.field)
    )]
    pub async fn aggregate(&self, query: &Query) -> AggregateOutcome {
        match self.try_aggregate(query).await {
            Ok(result) => {
                debug!(
                    total = result.total,
                    buckets = result.buckets.len(),
                    "aggregate ok"
                );
                AggregateOutcome::Observed(result)
            }
            Err(e) => {
                warn!(error = %e, query = %query.query, "Censys aggregate failed");
                AggregateOutcome::Failed(e)
            }
        }
    }

    /// Total hosts matching `query`.
    pub async fn total_hosts(&self, query: &str) -> AggregateOutcome {
        self.aggregate(&Query::new(query, TOTAL_FIELD, 1)).await
    }

    async fn try_aggregate(&self, query: &Query) -> Result<AggregateResult, AggregateError> {
        let response = self
            .http
            .post(self.aggregate_url.clone())
            .header(ACCEPT, "application/json")
            .basic_auth(&self.credentials.api_id, Some(&self.credentials.api_secret))
            .json(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AggregateError::status(status.as_u16(), &body));
        }
        let body = response.text().await?;
        let envelope: AggregateEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }
}
