use threat_ops::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct UtcTimer;

impl FormatTime for UtcTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

// Always exits 0: every failure degrades the image instead of aborting.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(UtcTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(name = version::NAME, version = version::VERSION, "Starting");

    let app_config = match config::AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Invalid config, using defaults");
            config::AppConfig::default().with_env_overrides(|key| std::env::var(key).ok())
        }
    };

    if let Err(e) = generate::run(&app_config).await {
        tracing::error!(error = %e, "Failed to write SVG");
    }
}
