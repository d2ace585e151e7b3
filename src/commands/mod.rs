pub mod app_config;
pub mod chat;
pub mod config;
pub mod generate;
pub mod history;
pub mod metrics;
pub mod models;
pub mod stats;

use llm_console::config::Config;

/// Resolve the model for generation commands: explicit flag first, then the
/// configured default.
pub fn resolve_model(cfg: &Config, flag: Option<String>) -> anyhow::Result<String> {
    flag.or_else(|| cfg.backend.default_model.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no model given; pass --model or set backend.default_model in config.toml")
        })
}
