// OpenRouter chat completion client. One attempt per call, no retry, no
// alerting; the handler turns failures into responses.

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::models::UpstreamRequest;

const DEFAULT_CREDIT_MESSAGE: &str = "Insufficient credits";

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamFailure {
    // 402 with upstream's message
    Credit(String),
    Status { status: u16, body: String },
    // 2xx without choices[0].message.content
    EmptyContent(Value),
    Timeout,
    Network(String),
    Unexpected(String),
}

#[derive(Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl OpenRouterClient {
    pub fn new(client: reqwest::Client, config: UpstreamConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    pub fn build_request(&self, text: &str) -> UpstreamRequest {
        UpstreamRequest::user_prompt(&self.config.model, self.config.max_tokens, text)
    }

    pub async fn complete(
        &self,
        api_key: &str,
        request: &UpstreamRequest,
    ) -> Result<String, UpstreamFailure> {
        let res = self
            .client
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(request)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = res.status();
        let body = res.text().await.map_err(classify_transport)?;

        if status == StatusCode::PAYMENT_REQUIRED {
            return Err(UpstreamFailure::Credit(credit_message(&body)));
        }
        if !status.is_success() {
            return Err(UpstreamFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| UpstreamFailure::Unexpected(format!("invalid JSON body: {}", e)))?;

        extract_content(&json).ok_or(UpstreamFailure::EmptyContent(json))
    }
}

fn classify_transport(e: reqwest::Error) -> UpstreamFailure {
    if e.is_timeout() {
        UpstreamFailure::Timeout
    } else {
        UpstreamFailure::Network(e.to_string())
    }
}

pub fn credit_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_CREDIT_MESSAGE.to_string())
}

pub fn extract_content(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// caller-facing message for non-2xx statuses other than 402
pub fn status_detail(status: u16) -> String {
    match status {
        401 => "Authentication error: Your OpenRouter API key is invalid or expired. Please check your API key in the .env file.".to_string(),
        403 => "Authorization error: You don't have permission to use this model or API. Please check your OpenRouter account.".to_string(),
        429 => "Rate limit exceeded: You've sent too many requests to OpenRouter API. Please try again later.".to_string(),
        500 => "OpenRouter API server error. Please try again later.".to_string(),
        other => format!("Error communicating with OpenRouter API: Status code {}", other),
    }
}
