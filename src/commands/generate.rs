use anyhow::Result;
use colored::Colorize;
use tracing::info;

use llm_console::{
    api::{BackendClient, GenerateRequest},
    config::Config,
};

pub async fn execute(
    cfg: &Config,
    prompt: String,
    model: Option<String>,
    max_new_tokens: Option<u32>,
    temperature: Option<f64>,
    top_p: Option<f64>,
) -> Result<()> {
    let model = super::resolve_model(cfg, model)?;
    let client = BackendClient::new(&cfg.backend);

    let mut request = GenerateRequest::new(model.clone(), prompt);
    request.max_new_tokens = max_new_tokens;
    request.temperature = temperature;
    request.top_p = top_p;

    info!(model, "sending generation request");
    let response = client.generate(&request).await?;

    println!("{}", response.result);

    if let Some(usage) = response.usage {
        eprintln!("{} {}", "usage:".dimmed(), usage);
    }
    if let Some(id) = response.id {
        eprintln!("{} {}", "history id:".dimmed(), id);
    }

    Ok(())
}
