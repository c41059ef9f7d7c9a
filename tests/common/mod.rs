//! In-process fakes for the upstream API and the alert webhook.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use openrouter_gateway::config::UpstreamConfig;
use openrouter_gateway::models::AlertPayload;
use openrouter_gateway::notifier::AlertNotifier;
use openrouter_gateway::settings::{Settings, SettingsHandle};
use openrouter_gateway::state::AppState;
use openrouter_gateway::upstream::OpenRouterClient;

/// Canned upstream answer plus a record of what it was sent.
#[derive(Clone)]
pub struct FakeUpstream {
    status: StatusCode,
    body: String,
    delay: Duration,
    pub hits: Arc<AtomicUsize>,
    pub auth_headers: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeUpstream {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            hits: Arc::new(AtomicUsize::new(0)),
            auth_headers: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn completion(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "gen-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        });
        Self::new(StatusCode::OK, body.to_string())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Serve on an ephemeral port; returns the completions URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/v1/chat/completions", post(fake_completion))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}/api/v1/chat/completions", addr)
    }
}

async fn fake_completion(
    State(fake): State<FakeUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        fake.auth_headers
            .lock()
            .unwrap()
            .push(auth.to_str().unwrap_or_default().to_string());
    }
    fake.requests.lock().unwrap().push(body);

    if !fake.delay.is_zero() {
        tokio::time::sleep(fake.delay).await;
    }
    (
        fake.status,
        [(header::CONTENT_TYPE, "application/json")],
        fake.body.clone(),
    )
}

/// Webhook that records every alert it receives.
#[derive(Clone, Default)]
pub struct FakeWebhook {
    pub alerts: Arc<Mutex<Vec<AlertPayload>>>,
    delay: Duration,
}

impl FakeWebhook {
    /// Webhook that records the alert, then takes `delay` to answer.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub async fn spawn(&self) -> String {
        let alerts = Arc::clone(&self.alerts);
        let delay = self.delay;
        let app = Router::new().route(
            "/webhook/alert",
            post(move |Json(payload): Json<AlertPayload>| {
                let alerts = Arc::clone(&alerts);
                async move {
                    alerts.lock().unwrap().push(payload);
                    tokio::time::sleep(delay).await;
                    StatusCode::OK
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}/webhook/alert", addr)
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    /// Alerts are detached tasks; poll until `n` arrived or give up.
    pub async fn wait_for(&self, n: usize) -> Vec<AlertPayload> {
        for _ in 0..100 {
            if self.count() >= n {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.alerts.lock().unwrap().clone()
    }

    /// Give any stray alert time to land, then report how many arrived.
    pub async fn settle(&self) -> usize {
        tokio::time::sleep(Duration::from_millis(300)).await;
        self.count()
    }
}

pub fn upstream_config(url: String) -> UpstreamConfig {
    UpstreamConfig {
        url,
        timeout: Duration::from_secs(5),
        ..UpstreamConfig::default()
    }
}

pub fn app_state(
    upstream: UpstreamConfig,
    settings: Settings,
    env_file: &Path,
    log_dir: &Path,
) -> Arc<AppState> {
    let client = reqwest::Client::new();
    let settings = SettingsHandle::new(settings, env_file);
    Arc::new(AppState {
        upstream: OpenRouterClient::new(client.clone(), upstream),
        notifier: AlertNotifier::new(client, settings.clone(), Duration::from_secs(2)),
        settings,
        log_dir: log_dir.to_path_buf(),
    })
}
