use anyhow::Result;
use colored::Colorize;
use tracing::info;

use llm_console::{api::BackendClient, config::Config};

use crate::cli::AppConfigCommands;

pub async fn execute(cfg: &Config, action: AppConfigCommands) -> Result<()> {
    let client = BackendClient::new(&cfg.backend);

    match action {
        AppConfigCommands::Show => {
            let app_config = client.get_app_config().await?;
            println!("{}", "Backend application config:".bold());
            println!("{}", serde_json::to_string_pretty(&app_config)?);
        }
        AppConfigCommands::Set { json } => {
            let payload: serde_json::Value = serde_json::from_str(&json)
                .map_err(|e| anyhow::anyhow!("invalid JSON payload: {}", e))?;
            if !payload.is_object() {
                anyhow::bail!("payload must be a JSON object of settings to merge");
            }

            info!("updating backend application config");
            client.set_app_config(&payload).await?;
            println!("{}", "✓ Application config updated".green());
        }
    }

    Ok(())
}
