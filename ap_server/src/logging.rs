//! Structured logging configuration.
//!
//! The engine crate logs through the `log` facade; the subscriber installed
//! here bridges those records into `tracing` alongside the server's own
//! events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are read from `RUST_LOG`, defaulting to `info`.
///
/// # Example
///
/// ```no_run
/// use ap_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,tower_http=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();

    tracing::info!("Structured logging initialized");
}

/// Log a completed eligibility check
///
/// # Arguments
///
/// * `operation` - Endpoint operation name
/// * `request_id` - Correlation id of the request
/// * `allowed` - Verdict outcome
/// * `reasons` - Number of violations on the verdict
pub fn log_verdict(operation: &str, request_id: &str, allowed: bool, reasons: usize) {
    tracing::info!(
        operation = operation,
        request_id = request_id,
        allowed = allowed,
        violations = reasons,
        "Eligibility verdict"
    );
}

/// Log a request refused for malformed input
pub fn log_input_error(operation: &str, request_id: &str, message: &str) {
    tracing::warn!(
        operation = operation,
        request_id = request_id,
        "Rejected input: {}",
        message
    );
}

/// Log API request/response
///
/// # Arguments
///
/// * `method` - HTTP method
/// * `path` - Request path
/// * `status_code` - Response status code
/// * `duration_ms` - Request duration in milliseconds
pub fn log_api_request(method: &str, path: &str, status_code: u16, duration_ms: u64) {
    tracing::info!(
        http_method = method,
        http_path = path,
        http_status = status_code,
        duration_ms = duration_ms,
        "API request completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_verdict() {
        // Just ensure it doesn't panic
        log_verdict("validate-player-eligibility", "req-1", true, 0);
        log_verdict("validate-tournament-start", "req-2", false, 3);
    }

    #[test]
    fn test_log_input_error() {
        log_input_error("validate-table-assignment", "req-3", "Missing required field table.id");
    }

    #[test]
    fn test_log_api_request() {
        log_api_request("POST", "/api/v1/age-restrictions/validate-player-eligibility", 200, 3);
        log_api_request("GET", "/health", 200, 0);
    }
}
