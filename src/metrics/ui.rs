//! Terminal UI for the stats dashboard
//!
//! Renders the parsed metrics snapshot as a table, refreshed on an
//! interval, similar in spirit to the `top` command.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::metrics::MetricsSnapshot;

/// Sort order for the metrics table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Value,
}

/// Application state for the stats dashboard
pub struct StatsApp {
    pub entries: Vec<(String, f64)>,
    pub last_update: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub sort_by: SortBy,
}

impl StatsApp {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            last_update: None,
            error_message: None,
            sort_by: SortBy::Name,
        }
    }

    /// Replace the displayed snapshot with a freshly parsed one
    pub fn update(&mut self, snapshot: MetricsSnapshot) {
        self.entries = snapshot.into_iter().collect();
        self.sort_entries();
        self.last_update = Some(Utc::now());
        self.error_message = None;
    }

    fn sort_entries(&mut self) {
        match self.sort_by {
            SortBy::Name => self.entries.sort_by(|a, b| a.0.cmp(&b.0)),
            SortBy::Value => self
                .entries
                .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)),
        }
    }

    /// Handle keyboard input; returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            KeyCode::Char('n') => {
                self.sort_by = SortBy::Name;
                self.sort_entries();
            }
            KeyCode::Char('v') => {
                self.sort_by = SortBy::Value;
                self.sort_entries();
            }
            _ => {}
        }
        false
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Table
                Constraint::Length(3), // Footer
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_table(f, chunks[1]);
        self.render_footer(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let sort_name = match self.sort_by {
            SortBy::Name => "name",
            SortBy::Value => "value",
        };

        let last_update = self
            .last_update
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let title = vec![
            Line::from(vec![
                Span::styled(
                    "Backend Metrics",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" - Sorted by: "),
                Span::styled(sort_name, Style::default().fg(Color::Yellow)),
                Span::raw("  |  Last update: "),
                Span::styled(last_update, Style::default().fg(Color::Green)),
            ]),
            Line::from(Span::styled(
                "Press 'q' to quit | 'r' to refresh | 'n'/'v' to sort by name/value",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_table(&self, f: &mut Frame, area: Rect) {
        let header = Row::new(vec![
            Cell::from("Metric").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Value").style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .style(Style::default().fg(Color::Cyan));

        let rows: Vec<Row> = self
            .entries
            .iter()
            .map(|(identity, value)| {
                Row::new(vec![
                    Cell::from(identity.as_str()),
                    Cell::from(format_value(*value)),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Percentage(75), Constraint::Percentage(25)])
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Samples"));

        f.render_widget(table, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let content = if let Some(err) = &self.error_message {
            Line::from(Span::styled(
                format!("Error: {}", err),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                format!("{} samples", self.entries.len()),
                Style::default().fg(Color::DarkGray),
            ))
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl Default for StatsApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Integers render without a fractional part, everything else with
/// enough precision to be useful
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.6}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn test_quit_keys() {
        let mut app = StatsApp::new();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_update_sorts_by_name() {
        let mut app = StatsApp::new();
        let mut snapshot = MetricsSnapshot::new();
        snapshot.insert("zzz".to_string(), 1.0);
        snapshot.insert("aaa".to_string(), 2.0);
        app.update(snapshot);
        assert_eq!(app.entries[0].0, "aaa");
        assert_eq!(app.entries[1].0, "zzz");
    }

    #[test]
    fn test_sort_by_value_is_descending() {
        let mut app = StatsApp::new();
        let mut snapshot = MetricsSnapshot::new();
        snapshot.insert("small".to_string(), 1.0);
        snapshot.insert("big".to_string(), 100.0);
        app.update(snapshot);
        app.handle_key(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::NONE));
        assert_eq!(app.entries[0].0, "big");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(1.5), "1.500000");
    }
}
