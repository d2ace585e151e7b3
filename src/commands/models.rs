use anyhow::Result;
use colored::Colorize;
use tracing::info;

use llm_console::{
    api::{BackendClient, SetModelParamRequest},
    config::Config,
};

use crate::cli::ModelCommands;

pub async fn execute(cfg: &Config, action: ModelCommands) -> Result<()> {
    let client = BackendClient::new(&cfg.backend);

    match action {
        ModelCommands::List => list(&client).await,
        ModelCommands::Show { name } => show(&client, &name).await,
        ModelCommands::SetParam {
            model,
            param,
            value,
        } => set_param(&client, model, param, value).await,
        ModelCommands::SetDefault { model } => set_default(&client, model).await,
    }
}

async fn list(client: &BackendClient) -> Result<()> {
    let configs = client.get_model_configs().await?;

    if configs.is_empty() {
        println!("{}", "No models configured".yellow());
        return Ok(());
    }

    let mut names: Vec<_> = configs.keys().collect();
    names.sort();

    println!("{}", "Configured models:".bold());
    for name in names {
        let cfg = &configs[name];
        println!(
            "  {}  {} (temperature={}, top_p={})",
            name.green(),
            cfg.model_type.dimmed(),
            cfg.temperature,
            cfg.top_p
        );
    }

    Ok(())
}

async fn show(client: &BackendClient, name: &str) -> Result<()> {
    let configs = client.get_model_configs().await?;

    let Some(model) = configs.get(name) else {
        anyhow::bail!("model '{}' is not configured on the backend", name);
    };

    println!("{}", serde_json::to_string_pretty(model)?);
    Ok(())
}

async fn set_param(
    client: &BackendClient,
    model: String,
    param: String,
    value: String,
) -> Result<()> {
    // Bare words become JSON strings so `set-param m device cuda` works
    let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));

    info!(model, param, "setting model parameter");
    client
        .set_model_param(&SetModelParamRequest {
            model: model.clone(),
            param: param.clone(),
            value,
        })
        .await?;

    println!("{} {}.{}", "✓ Updated".green(), model, param);
    Ok(())
}

async fn set_default(client: &BackendClient, model: String) -> Result<()> {
    client.set_default_model(&model).await?;
    println!("{} default model is now {}", "✓".green(), model.bold());
    Ok(())
}
