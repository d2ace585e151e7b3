use anyhow::Result;
use colored::Colorize;

use llm_console::{api::BackendClient, config::Config};

pub async fn execute(cfg: &Config, limit: u32, offset: u32, full: bool) -> Result<()> {
    let client = BackendClient::new(&cfg.backend);
    let entries = client.get_history(limit, offset).await?;

    if entries.is_empty() {
        println!("{}", "No history entries".yellow());
        return Ok(());
    }

    println!(
        "{} (showing {} from offset {})",
        "Request history".bold(),
        entries.len(),
        offset
    );

    for entry in entries {
        let id = entry
            .id
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        let when = entry.timestamp.as_deref().unwrap_or("unknown time");
        let star = if entry.favorite == Some(true) { "★" } else { " " };
        let model = entry.model.as_deref().unwrap_or("?");

        println!(
            "{} {} {} {}",
            format!("[{}]", id).dimmed(),
            star.yellow(),
            when.dimmed(),
            model.green()
        );

        if full {
            println!("  {} {}", "prompt:".cyan(), entry.prompt);
            println!("  {} {}", "response:".cyan(), entry.response);
        } else {
            println!("  {} {}", "prompt:".cyan(), one_line(&entry.prompt, 80));
            println!("  {} {}", "response:".cyan(), one_line(&entry.response, 80));
        }
    }

    Ok(())
}

/// Collapse text to a single truncated line for list display
fn one_line(text: &str, max_chars: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let truncated: String = flat.chars().take(max_chars).collect();
        format!("{}…", truncated)
    }
}
