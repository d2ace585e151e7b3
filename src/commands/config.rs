use anyhow::Result;
use colored::Colorize;
use tracing::info;

use llm_console::config::{self, Config};

/// Display the effective client configuration
pub fn show(cfg: &Config) -> Result<()> {
    println!("{}", "Current configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Validate config.toml plus environment overrides
pub fn validate() -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config()?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Backend:          {}", cfg.backend.base_url);
    println!("  Request timeout:  {}s", cfg.backend.timeout_seconds);
    println!(
        "  Default model:    {}",
        cfg.backend.default_model.as_deref().unwrap_or("(none)")
    );
    println!("  Metrics endpoint: {}", cfg.metrics.endpoint);

    info!("configuration validation successful");
    Ok(())
}
