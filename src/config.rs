use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the model-serving backend, e.g. "http://localhost:8000"
    pub base_url: String,
    /// Request timeout for non-streaming calls; streaming calls run until
    /// the backend closes the connection
    pub timeout_seconds: u64,
    /// Model preselected by `chat` and `generate` when --model is omitted
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Path of the Prometheus exposition endpoint on the backend
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 60,
            default_model: None,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            endpoint: "/metrics/prometheus".to_string(),
        }
    }
}

/// Load configuration from config.toml plus LLM_CONSOLE__* env overrides.
///
/// A missing file falls back to defaults so the binary works against a
/// local backend out of the box.
pub fn load_config() -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("LLM_CONSOLE").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.backend.base_url.is_empty() {
        anyhow::bail!("backend.base_url cannot be empty");
    }

    if !cfg.backend.base_url.starts_with("http://") && !cfg.backend.base_url.starts_with("https://")
    {
        anyhow::bail!(
            "backend.base_url must start with http:// or https://, got '{}'",
            cfg.backend.base_url
        );
    }

    if cfg.backend.timeout_seconds == 0 {
        anyhow::bail!("backend.timeout_seconds must be greater than zero");
    }

    if !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!(
            "metrics.endpoint must be an absolute path, got '{}'",
            cfg.metrics.endpoint
        );
    }

    Ok(())
}

/// Full URL of the metrics endpoint for this configuration
pub fn metrics_url(cfg: &Config) -> String {
    format!(
        "{}{}",
        cfg.backend.base_url.trim_end_matches('/'),
        cfg.metrics.endpoint
    )
}
