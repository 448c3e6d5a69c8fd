//! Prometheus metrics for the eligibility service.
//!
//! Metrics are exposed in Prometheus text format on a dedicated listener,
//! installed only when a metrics address is configured. Without an installed
//! recorder every call here is a no-op.
//!
//! # Metrics Categories
//!
//! - **HTTP Metrics**: Request counts, duration, status codes
//! - **Eligibility Metrics**: Verdicts by operation and outcome, input errors
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use ap_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::eligibility_verdicts_total("validate-player-eligibility", false);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Eligibility Metrics
// ============================================================================

/// Increment verdict counter for one completed check.
pub fn eligibility_verdicts_total(operation: &str, allowed: bool) {
    metrics::counter!("eligibility_verdicts_total",
        "operation" => operation.to_string(),
        "allowed" => allowed.to_string()
    )
    .increment(1);
}

/// Increment counter for requests rejected as malformed input.
pub fn input_errors_total(operation: &str, code: &str) {
    metrics::counter!("input_errors_total",
        "operation" => operation.to_string(),
        "code" => code.to_string()
    )
    .increment(1);
}

/// Record number of players evaluated by one batch request.
pub fn batch_players(count: usize) {
    metrics::histogram!("batch_players").record(count as f64);
}
