//! HTTP relay in front of the OpenRouter chat completion API.
//!
//! `POST /generate` forwards a prompt upstream and maps upstream failures to
//! client-facing errors, firing a webhook alert on the way out.
//! `POST /reload-env` re-reads the API key and webhook URL without a restart.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notifier;
pub mod settings;
pub mod state;
pub mod upstream;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::handlers::{generate_handler, health_handler, metrics_handler, reload_env_handler};
use crate::state::AppState;

// creating the router with routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/reload-env", post(reload_env_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
