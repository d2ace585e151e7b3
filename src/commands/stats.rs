//! Stats command implementation
//!
//! Implements the `stats` subcommand: a real-time dashboard over the
//! backend's Prometheus endpoint, refreshed on an interval.

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::FutureExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::time::interval;

use llm_console::{
    config::{self, Config},
    metrics::{parse_metrics, MetricsFetcher, StatsApp},
};

pub async fn execute(cfg: &Config, interval_secs: f64, url: Option<String>) -> Result<()> {
    if !(0.1..=60.0).contains(&interval_secs) {
        anyhow::bail!(
            "Invalid interval: {}. Must be between 0.1 and 60 seconds",
            interval_secs
        );
    }

    let metrics_url = url.unwrap_or_else(|| config::metrics_url(cfg));

    run_dashboard(metrics_url, interval_secs).await
}

async fn run_dashboard(metrics_url: String, interval_secs: f64) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = StatsApp::new();
    let fetcher = MetricsFetcher::new(metrics_url);
    let mut interval_timer = interval(Duration::from_secs_f64(interval_secs));

    // Initial fetch
    fetch_and_update(&mut app, &fetcher).await;

    let result = loop {
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) {
                    break Ok(());
                }

                if matches!(
                    key.code,
                    crossterm::event::KeyCode::Char('r') | crossterm::event::KeyCode::Char('R')
                ) {
                    fetch_and_update(&mut app, &fetcher).await;
                }
            }
        }

        // Check if interval elapsed
        if interval_timer.tick().now_or_never().is_some() {
            fetch_and_update(&mut app, &fetcher).await;
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Fetch metrics and update app state. Fetch or parse trouble leaves the
/// last good snapshot in view and shows the error in the footer.
async fn fetch_and_update(app: &mut StatsApp, fetcher: &MetricsFetcher) {
    match fetcher.fetch().await {
        Ok(text) => {
            app.update(parse_metrics(&text));
        }
        Err(e) => {
            app.error_message = Some(format!("Fetch error: {}", e));
        }
    }
}
