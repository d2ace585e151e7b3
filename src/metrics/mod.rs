//! Metrics fetching, parsing, and display
//!
//! The backend exposes Prometheus exposition-format text; this module pulls
//! it, flattens it into a snapshot keyed by metric identity, and renders it
//! in a terminal dashboard.

pub mod fetcher;
pub mod parser;
pub mod ui;

pub use fetcher::MetricsFetcher;
pub use parser::{parse_metrics, MetricsSnapshot};
pub use ui::StatsApp;
