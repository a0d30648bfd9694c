// One generation pass: decide dashboard vs fallback, render, write the file.
// Nothing here is fatal to the caller except the final write.

use crate::collector::Collector;
use crate::config::AppConfig;
use crate::format::format_count;
use crate::models::MetricsSnapshot;
use crate::render;
use std::path::Path;
use tracing::{debug, info, warn};

/// Why the fallback image was chosen over the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredentials,
    /// Primary total came back 0, either observed or because the call failed.
    NoData,
    /// The HTTP client could not be constructed.
    ClientSetup,
}

#[derive(Debug)]
pub enum Document {
    Dashboard(MetricsSnapshot),
    Fallback(FallbackReason),
}

impl Document {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Document::Fallback(_))
    }
}

/// Collects metrics when credentials are configured and picks the document to render.
pub async fn choose_document(config: &AppConfig) -> Document {
    let Some(credentials) = config.censys.credentials() else {
        warn!("No Censys API credentials found, generating fallback SVG");
        return Document::Fallback(FallbackReason::MissingCredentials);
    };
    let collector = match Collector::from_config(&config.censys, credentials) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Censys client setup failed, generating fallback SVG");
            return Document::Fallback(FallbackReason::ClientSetup);
        }
    };
    let snapshot = collector.collect().await;
    if snapshot.total_hosts == 0 {
        warn!("No data returned from Censys, generating fallback SVG");
        return Document::Fallback(FallbackReason::NoData);
    }
    if let Ok(json) = serde_json::to_string(&snapshot) {
        debug!(snapshot = %json, "Collected metrics");
    }
    Document::Dashboard(snapshot)
}

pub fn render_document(doc: &Document, config: &AppConfig) -> String {
    match doc {
        Document::Dashboard(snapshot) => {
            render::render_dashboard(snapshot, &config.render.tagline)
        }
        Document::Fallback(_) => render::render_fallback(),
    }
}

/// Writes `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("creating {}: {}", parent.display(), e))?;
    }
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("writing {}: {}", path.display(), e))?;
    Ok(())
}

/// Full pass: choose, render, write to `config.output.path`.
pub async fn run(config: &AppConfig) -> anyhow::Result<Document> {
    let doc = choose_document(config).await;
    let svg = render_document(&doc, config);
    if let Document::Dashboard(snapshot) = &doc {
        info!(
            total_hosts = %format_count(snapshot.total_hosts),
            "Generated ops center dashboard"
        );
    }
    let path = Path::new(&config.output.path);
    write_output(path, &svg)?;
    info!(path = %path.display(), bytes = svg.len(), "SVG written");
    Ok(doc)
}
