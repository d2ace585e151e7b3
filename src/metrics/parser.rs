//! Lenient Prometheus exposition-format parsing
//!
//! The parser is deliberately best-effort, matching the tolerant nature of
//! the format: comment and blank lines are skipped, lines that do not look
//! like `name[{labels}] value` are skipped silently, and a malformed value
//! on an otherwise well-formed line drops that line only, never the parse.
//!
//! Known limitation, kept on purpose: label values are unescaped by quote
//! stripping and label sets are split on bare commas, so embedded quotes or
//! commas inside a label value are not supported.

use std::collections::HashMap;

/// Flat mapping from sample identity to value, rebuilt fully on every parse.
///
/// Identity is the bare metric name when the sample has no labels, or the
/// name plus its label set rendered with keys in sorted order, so equal
/// label sets always collide and differing ones never do.
pub type MetricsSnapshot = HashMap<String, f64>;

/// Parse one exposition-format blob into a snapshot.
///
/// Pure and stateless: parsing the same text twice yields the same
/// snapshot. Later lines with an identical identity overwrite earlier ones.
pub fn parse_metrics(text: &str) -> MetricsSnapshot {
    let mut snapshot = MetricsSnapshot::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((identity, value_token)) = parse_sample(line) else {
            tracing::trace!(line, "skipping unmatched metric line");
            continue;
        };

        match value_token.parse::<f64>() {
            Ok(value) => {
                snapshot.insert(identity, value);
            }
            Err(_) => {
                tracing::debug!(line, "skipping metric line with malformed value");
            }
        }
    }

    snapshot
}

/// Split a data line into (identity, value token), or None if it does not
/// match the `name[{labels}] value` shape.
fn parse_sample(line: &str) -> Option<(String, &str)> {
    let Some(open) = line.find('{') else {
        let mut parts = line.split_whitespace();
        let name = parts.next()?;
        let value = parts.next()?;
        if !is_metric_name(name) {
            return None;
        }
        return Some((name.to_string(), value));
    };

    let name = &line[..open];
    if !is_metric_name(name) {
        return None;
    }

    let close = line[open..].find('}')? + open;
    let labels_raw = &line[open + 1..close];
    // The exposition format allows a timestamp after the value; taking the
    // first token keeps such lines parseable.
    let value = line[close + 1..].split_whitespace().next()?;

    if labels_raw.is_empty() {
        return Some((name.to_string(), value));
    }

    let mut labels: Vec<(String, String)> = Vec::new();
    for pair in labels_raw.split(',') {
        let (key, val) = pair.split_once('=')?;
        labels.push((key.trim().to_string(), val.replace('"', "")));
    }
    labels.sort_by(|a, b| a.0.cmp(&b.0));

    let rendered: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect();

    Some((format!("{}{{{}}}", name, rendered.join(",")), value))
}

fn is_metric_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_and_labeled_samples() {
        let snapshot = parse_metrics("# comment\nfoo 1.5\nbar{model=\"x\"} 42\n");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["foo"], 1.5);
        assert_eq!(snapshot["bar{model=\"x\"}"], 42.0);
    }

    #[test]
    fn test_label_set_differentiates_identity() {
        let snapshot = parse_metrics("baz{a=\"1\",b=\"2\"} 7\nbaz{a=\"1\",b=\"3\"} 8\n");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["baz{a=\"1\",b=\"2\"}"], 7.0);
        assert_eq!(snapshot["baz{a=\"1\",b=\"3\"}"], 8.0);
    }

    #[test]
    fn test_label_order_does_not_change_identity() {
        let snapshot = parse_metrics("baz{b=\"2\",a=\"1\"} 7\nbaz{a=\"1\",b=\"2\"} 9\n");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["baz{a=\"1\",b=\"2\"}"], 9.0);
    }

    #[test]
    fn test_last_write_wins_for_identical_identity() {
        let snapshot = parse_metrics("foo 1\nfoo 2\n");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["foo"], 2.0);
    }

    #[test]
    fn test_empty_and_comment_only_input() {
        assert!(parse_metrics("").is_empty());
        assert!(parse_metrics("# HELP foo\n# TYPE foo counter\n\n  \n").is_empty());
    }

    #[test]
    fn test_unmatched_lines_are_skipped_not_fatal() {
        let snapshot = parse_metrics("malformed_no_value\n<<garbage>> 3\nok 5\n");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["ok"], 5.0);
    }

    #[test]
    fn test_malformed_value_skips_line_only() {
        let snapshot = parse_metrics("bad xyz\ngood 1\n");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["good"], 1.0);
    }

    #[test]
    fn test_value_with_trailing_timestamp() {
        let snapshot = parse_metrics("foo{a=\"1\"} 2.5 1690000000\n");
        assert_eq!(snapshot["foo{a=\"1\"}"], 2.5);
    }

    #[test]
    fn test_histogram_inf_bucket_parses() {
        let snapshot = parse_metrics("latency_bucket{le=\"+Inf\"} 120\n");
        assert_eq!(snapshot["latency_bucket{le=\"+Inf\"}"], 120.0);
    }

    #[test]
    fn test_idempotent_across_calls() {
        let text = "foo 1.5\nbar{model=\"x\"} 42\n";
        assert_eq!(parse_metrics(text), parse_metrics(text));
    }

    #[test]
    fn test_colon_in_recording_rule_name() {
        let snapshot = parse_metrics("job:latency:p99 0.25\n");
        assert_eq!(snapshot["job:latency:p99"], 0.25);
    }
}
