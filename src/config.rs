use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";
// keep the token cap low, the default one burns through credits
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "openrouter-gateway")]
#[command(about = "Relays prompts to OpenRouter and alerts a webhook on failure")]
pub struct Args {
    // Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    // .env file holding OPENROUTER_API_KEY and N8N_WEBHOOK_URL
    #[arg(short, long, default_value = ".env")]
    pub env_file: PathBuf,

    // Directory for the daily log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    // Log filter directive, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    // Chat completion endpoint
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    // Model sent with every request
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    // Token cap sent with every request
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    // Upstream timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub upstream_timeout: u64,

    // Webhook timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub alert_timeout: u64,
}

/// Fixed per-deployment description of the upstream chat-completion API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(60),
        }
    }
}

impl Args {
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            url: self.upstream_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.upstream_timeout),
        }
    }

    pub fn alert_timeout(&self) -> Duration {
        Duration::from_secs(self.alert_timeout)
    }
}
