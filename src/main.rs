use anyhow::Context;
use clap::Parser; // for cli
use std::sync::Arc;

use openrouter_gateway::config::Args;
use openrouter_gateway::notifier::AlertNotifier;
use openrouter_gateway::settings::{Settings, SettingsHandle};
use openrouter_gateway::state::AppState;
use openrouter_gateway::upstream::OpenRouterClient;
use openrouter_gateway::{logging, router};

// this is main async function with tokio
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments
    let args = Args::parse();

    // guard flushes the file writer on exit
    let _log_guard = logging::init(&args.log_dir, &args.log_level)?;
    tracing::info!(
        "Application started. Logs are being written to {}",
        logging::current_log_file(&args.log_dir).display()
    );

    // missing key or webhook is fatal at startup
    let settings = Settings::load(&args.env_file).with_context(|| {
        format!("failed to load settings (env file: {})", args.env_file.display())
    })?;
    let settings = SettingsHandle::new(settings, args.env_file.clone());

    let client = reqwest::Client::new();
    let upstream = args.upstream();
    tracing::info!(
        "Forwarding to {} (model: {}, max_tokens: {})",
        upstream.url,
        upstream.model,
        upstream.max_tokens
    );

    // creating shared state
    let state = Arc::new(AppState {
        upstream: OpenRouterClient::new(client.clone(), upstream),
        notifier: AlertNotifier::new(client, settings.clone(), args.alert_timeout()),
        settings,
        log_dir: args.log_dir.clone(),
    });

    let app = router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Gateway running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
