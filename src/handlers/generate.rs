use axum::{Json, extract::State};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

use crate::error::RelayError;
use crate::logging::current_log_file;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL, UPSTREAM_FAILURES};
use crate::models::{GenerateRequest, GenerateResponse, UpstreamRequest};
use crate::settings::Settings;
use crate::state::AppState;
use crate::upstream::{UpstreamFailure, status_detail};

const INPUT_PREVIEW_CHARS: usize = 50;
const OUTPUT_PREVIEW_CHARS: usize = 100;

// First `max_chars` characters of `text`, for logging
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, RelayError> {
    REQUEST_TOTAL.inc();
    tracing::info!("Request received: {}...", preview(&payload.text, INPUT_PREVIEW_CHARS));

    let start_time = Instant::now();
    let settings = state.settings.snapshot();
    let request = state.upstream.build_request(&payload.text);

    let config = state.upstream.config();
    tracing::info!(
        "Sending request to OpenRouter (Model: {}, max_tokens: {})...",
        config.model,
        config.max_tokens
    );

    let result = state.upstream.complete(&settings.api_key, &request).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    match result {
        Ok(content) => {
            tracing::info!(
                "Response received from OpenRouter: {}...",
                preview(&content, OUTPUT_PREVIEW_CHARS)
            );
            Ok(Json(GenerateResponse {
                generated_text: content,
            }))
        }
        Err(failure) => {
            UPSTREAM_FAILURES.inc();
            Err(handle_failure(&state, settings, &request, failure))
        }
    }
}

// Log, alert (except on 402) and pick the caller-facing error. Alerts go to
// the webhook from the same snapshot the upstream call used.
fn handle_failure(
    state: &AppState,
    settings: Arc<Settings>,
    request: &UpstreamRequest,
    failure: UpstreamFailure,
) -> RelayError {
    let request_json = serde_json::to_value(request).unwrap_or_default();
    let log_file = current_log_file(&state.log_dir);

    match failure {
        UpstreamFailure::Credit(message) => {
            tracing::error!("OpenRouter API credit error: {}", message);
            RelayError::Credit(format!(
                "OpenRouter API credit issue: {}. Please visit https://openrouter.ai/settings/credits to upgrade your account.",
                message
            ))
        }
        UpstreamFailure::Status { status, body } => {
            tracing::error!("OpenRouter API error: {} - {}", status, body);
            state.notifier.notify(
                settings,
                format!("OpenRouter API error: {}", status),
                Some(json!({ "request": request_json, "response": body })),
            );
            RelayError::BadGateway(status_detail(status))
        }
        UpstreamFailure::EmptyContent(body) => {
            tracing::error!("Could not get a valid response from OpenRouter. Response: {}", body);
            state.notifier.notify(
                settings,
                "Empty or invalid response received from OpenRouter.",
                Some(request_json),
            );
            RelayError::InvalidResponse("Could not get a valid response from API.".to_string())
        }
        UpstreamFailure::Timeout => {
            let message = "OpenRouter API request timed out.";
            tracing::error!("{}", message);
            state.notifier.notify(settings, message, Some(request_json));
            RelayError::Timeout(message.to_string())
        }
        UpstreamFailure::Network(e) => {
            tracing::error!("Network error while connecting to OpenRouter API: {}", e);
            state
                .notifier
                .notify(settings, format!("Network error: {}", e), Some(request_json));
            RelayError::Network(format!(
                "A network error occurred while connecting to the API. Please check your internet connection. Logs are saved in {}",
                log_file.display()
            ))
        }
        UpstreamFailure::Unexpected(e) => {
            tracing::error!("An unexpected error occurred: {}", e);
            state
                .notifier
                .notify(settings, format!("Unexpected server error: {}", e), Some(request_json));
            RelayError::Internal(format!(
                "An unexpected error occurred on the server. Please check the logs at {} for more details.",
                log_file.display()
            ))
        }
    }
}
