use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("gateway_requests_total", "Total number of generate requests").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("gateway_upstream_failures_total", "Generate requests that ended in an error").unwrap();
    pub static ref ALERTS_SENT: Counter =
        register_counter!("gateway_alerts_sent_total", "Webhook alerts accepted by the webhook").unwrap();
    pub static ref ALERTS_FAILED: Counter =
        register_counter!("gateway_alerts_failed_total", "Webhook alerts that could not be delivered").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "gateway_request_latency_seconds",
        "Generate request latency in seconds"
    )
    .unwrap();
}

/// Render every registered metric in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    use prometheus::{Encoder, TextEncoder};

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
