use serde::Deserialize;

pub const DEFAULT_AGGREGATE_URL: &str = "https://search.censys.io/api/v2/hosts/aggregate";
pub const DEFAULT_OUTPUT_PATH: &str = "assets/threat-ops.svg";
pub const DEFAULT_TAGLINE: &str = "cybrdude // netguard24-7.com // attack surface management";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub censys: CensysConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CensysConfig {
    #[serde(default)]
    pub api_id: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default = "default_aggregate_url")]
    pub aggregate_url: String,
    /// Bound on each aggregate call; there is no retry.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CensysConfig {
    fn default() -> Self {
        Self {
            api_id: String::new(),
            api_secret: String::new(),
            aggregate_url: default_aggregate_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_aggregate_url() -> String {
    DEFAULT_AGGREGATE_URL.into()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Second footer line of the dashboard.
    #[serde(default = "default_tagline")]
    pub tagline: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tagline: default_tagline(),
        }
    }
}

fn default_tagline() -> String {
    DEFAULT_TAGLINE.into()
}

/// API identifier/secret pair used for HTTP Basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_id: String,
    pub api_secret: String,
}

// Keep the secret out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl CensysConfig {
    /// Both halves must be non-empty; otherwise the dashboard falls back.
    pub fn credentials(&self) -> Option<Credentials> {
        if self.api_id.is_empty() || self.api_secret.is_empty() {
            return None;
        }
        Some(Credentials {
            api_id: self.api_id.clone(),
            api_secret: self.api_secret.clone(),
        })
    }
}

impl AppConfig {
    /// Reads the TOML file named by `CONFIG_FILE` (built-in defaults when unset),
    /// then applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("reading {}: {}", path, e))?;
                Self::load_from_str(&s)?
            }
            Err(_) => Self::default(),
        };
        let config = base.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `CENSYS_API_ID`, `CENSYS_API_SECRET`, `CENSYS_API_URL` and
    /// `OUTPUT_PATH` from `lookup`. Empty values are ignored.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(v) = get("CENSYS_API_ID") {
            self.censys.api_id = v;
        }
        if let Some(v) = get("CENSYS_API_SECRET") {
            self.censys.api_secret = v;
        }
        if let Some(v) = get("CENSYS_API_URL") {
            self.censys.aggregate_url = v;
        }
        if let Some(v) = get("OUTPUT_PATH") {
            self.output.path = v;
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.censys.aggregate_url.is_empty(),
            "censys.aggregate_url must be non-empty"
        );
        anyhow::ensure!(
            self.censys.timeout_secs > 0,
            "censys.timeout_secs must be > 0, got {}",
            self.censys.timeout_secs
        );
        anyhow::ensure!(!self.output.path.is_empty(), "output.path must be non-empty");
        Ok(())
    }
}
