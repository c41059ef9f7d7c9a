use axum::{Json, extract::State};
use std::sync::Arc;

use crate::error::RelayError;
use crate::models::ReloadResponse;
use crate::state::AppState;

pub async fn reload_env_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, RelayError> {
    let settings = state.settings.reload().map_err(|e| {
        tracing::error!("Error reloading environment variables: {}", e);
        RelayError::from(e)
    })?;

    tracing::info!(
        "Environment variables reloaded successfully from {}",
        state.settings.env_file().display()
    );
    tracing::info!("Using OpenRouter API key ending with: ...{}", settings.key_hint());
    tracing::info!(
        "Using webhook URL: {}",
        settings.webhook_url.as_deref().unwrap_or("None")
    );

    Ok(Json(ReloadResponse {
        status: "success".to_string(),
        message: "Environment variables reloaded successfully".to_string(),
    }))
}
