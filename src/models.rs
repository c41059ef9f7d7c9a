use serde::{Deserialize, Serialize};

// Caller request format
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct GenerateRequest {
    pub text: String,
}

// Caller response format
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct GenerateResponse {
    pub generated_text: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// OpenRouter chat completion request format
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct UpstreamRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl UpstreamRequest {
    pub fn user_prompt(model: &str, max_tokens: u32, text: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: text.to_string(),
            }],
            max_tokens,
        }
    }
}

// Body posted to the alert webhook
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AlertPayload {
    pub error_source: String,
    pub error_message: String,
    pub original_request: serde_json::Value,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ReloadResponse {
    pub status: String,
    pub message: String,
}
