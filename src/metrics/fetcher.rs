//! Metrics fetcher for retrieving Prometheus metrics from HTTP endpoint

use reqwest::Client;

use crate::error::ClientError;

/// HTTP client wrapper for fetching metrics
pub struct MetricsFetcher {
    client: Client,
    url: String,
}

impl MetricsFetcher {
    /// Create a new metrics fetcher
    ///
    /// # Arguments
    /// * `url` - Full URL to the metrics endpoint
    ///   (e.g., "http://localhost:8000/metrics/prometheus")
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Fetch the raw exposition-format text from the endpoint
    pub async fn fetch(&self) -> Result<String, ClientError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(ClientError::from_send_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ClientError::Backend { status, message });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let url = "http://localhost:8000/metrics/prometheus".to_string();
        let fetcher = MetricsFetcher::new(url.clone());
        assert_eq!(fetcher.url, url);
    }
}
