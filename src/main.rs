use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use llm_console::{config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    let mut cfg = config::load_config()?;
    if let Some(base_url) = args.base_url {
        cfg.backend.base_url = base_url;
    }

    match args.command {
        cli::Commands::Models { action } => {
            commands::models::execute(&cfg, action).await?;
        }
        cli::Commands::Generate {
            prompt,
            model,
            max_new_tokens,
            temperature,
            top_p,
        } => {
            commands::generate::execute(&cfg, prompt, model, max_new_tokens, temperature, top_p)
                .await?;
        }
        cli::Commands::Chat { model } => {
            commands::chat::execute(&cfg, model).await?;
        }
        cli::Commands::History {
            limit,
            offset,
            full,
        } => {
            commands::history::execute(&cfg, limit, offset, full).await?;
        }
        cli::Commands::AppConfig { action } => {
            commands::app_config::execute(&cfg, action).await?;
        }
        cli::Commands::Metrics => {
            commands::metrics::execute(&cfg).await?;
        }
        cli::Commands::Stats { interval, url } => {
            commands::stats::execute(&cfg, interval, url).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate()?,
        },
        cli::Commands::Version => {
            println!("llm-console v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
