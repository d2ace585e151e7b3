use anyhow::Result;
use colored::Colorize;

use llm_console::{
    config::{self, Config},
    metrics::{parse_metrics, MetricsFetcher},
};

/// One-shot fetch and parse, printed as a sorted table
pub async fn execute(cfg: &Config) -> Result<()> {
    let fetcher = MetricsFetcher::new(config::metrics_url(cfg));
    let text = fetcher.fetch().await?;
    let snapshot = parse_metrics(&text);

    if snapshot.is_empty() {
        println!("{}", "No samples in metrics response".yellow());
        return Ok(());
    }

    let mut entries: Vec<_> = snapshot.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    println!("{}", "Backend metrics:".bold());
    for (identity, value) in entries {
        println!("  {:width$}  {}", identity.green(), value, width = width);
    }

    Ok(())
}
