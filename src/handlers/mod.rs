mod generate;
mod health;
mod metrics;
mod reload;

pub use generate::generate_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use reload::reload_env_handler;
