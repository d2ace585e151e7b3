//! Typed client for the model-serving backend
//!
//! Thin wrappers over `reqwest`: every method maps a non-success status to
//! [`ClientError::Backend`] and a connection-level failure to
//! [`ClientError::TransportUnavailable`]. No retry, no backoff; callers
//! decide what a failure means for the user.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::api::types::{
    GenerateRequest, GenerateResponse, HistoryEntry, ModelConfig, SetModelParamRequest,
    StreamGenerateRequest,
};
use crate::config::BackendConfig;
use crate::error::ClientError;

pub struct BackendClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// All configured models, keyed by model name
    pub async fn get_model_configs(&self) -> Result<HashMap<String, ModelConfig>, ClientError> {
        self.get_json("/admin/model_configs").await
    }

    pub async fn set_model_param(&self, req: &SetModelParamRequest) -> Result<Value, ClientError> {
        self.post_json("/admin/set_model_param", req).await
    }

    pub async fn set_default_model(&self, model: &str) -> Result<Value, ClientError> {
        self.post_json("/admin/set_default_model", &serde_json::json!({ "model": model }))
            .await
    }

    pub async fn get_app_config(&self) -> Result<Value, ClientError> {
        self.get_json("/admin/app_config").await
    }

    pub async fn set_app_config(&self, config: &Value) -> Result<Value, ClientError> {
        self.post_json("/admin/set_app_config", config).await
    }

    /// Single-shot generation
    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        self.post_json("/llm/generate", req).await
    }

    /// Open a streaming generation. The returned response body is raw
    /// chunked completion text, terminated by connection close; feed it to
    /// [`crate::stream::GenerationStream::spawn`]. No timeout is applied:
    /// the stream runs until the backend closes it or the caller drops it.
    pub async fn stream_generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let body = StreamGenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
        };

        let response = self
            .client
            .post(self.url("/llm/stream_generate"))
            .json(&body)
            .send()
            .await
            .map_err(ClientError::from_send_error)?;

        Self::check_status(response).await
    }

    /// Request history, newest first
    pub async fn get_history(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<HistoryEntry>, ClientError> {
        let response = self
            .client
            .get(self.url("/llm/llm_history"))
            .query(&[("limit", limit), ("offset", offset)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(ClientError::from_send_error)?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .client
            .get(self.url(path))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(ClientError::from_send_error)?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(ClientError::from_send_error)?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(ClientError::Backend { status, message });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new(&BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_seconds: 5,
            default_model: None,
        });
        assert_eq!(
            client.url("/admin/model_configs"),
            "http://localhost:8000/admin/model_configs"
        );
    }
}
