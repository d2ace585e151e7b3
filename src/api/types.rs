use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One configured model as reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub model_type: String,
    pub model_path: String,
    #[serde(default)]
    pub params: HashMap<String, Value>,
    pub temperature: f64,
    pub top_p: f64,
}

/// Single-shot generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            params: None,
            max_new_tokens: None,
            temperature: None,
            top_p: None,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    pub prompt: String,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Body of the streaming generation request. The response is raw chunked
/// completion text, not JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamGenerateRequest {
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetModelParamRequest {
    pub model: String,
    pub param: String,
    pub value: Value,
}

/// One request-history record. Older backend generations named the fields
/// `question`/`answer`; both spellings are accepted on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(alias = "question")]
    pub prompt: String,
    #[serde(alias = "answer")]
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_type_field_rename() {
        let json = r#"{
            "name": "deepseek",
            "type": "transformers",
            "model_path": "/models/deepseek",
            "params": {"max_new_tokens": 512},
            "temperature": 0.7,
            "top_p": 0.9
        }"#;
        let cfg: ModelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.model_type, "transformers");
        assert_eq!(cfg.params["max_new_tokens"], 512);
    }

    #[test]
    fn test_generate_request_omits_unset_fields() {
        let req = GenerateRequest::new("m", "p");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("temperature"));
        assert!(!json.contains("user_id"));
    }

    #[test]
    fn test_history_entry_accepts_legacy_field_names() {
        let json = r#"{"question": "hi", "answer": "hello", "favorite": true}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.prompt, "hi");
        assert_eq!(entry.response, "hello");
        assert_eq!(entry.favorite, Some(true));
    }

    #[test]
    fn test_history_entry_current_field_names() {
        let json = r#"{"id": 3, "prompt": "hi", "response": "hello", "timestamp": "2025-01-01T00:00:00"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, Some(3));
        assert_eq!(entry.timestamp.as_deref(), Some("2025-01-01T00:00:00"));
    }
}
