//! Metrics collection.
//!
//! # Metrics
//! - `adaptor_requests_total` (counter): completed exchanges by method, status
//! - `adaptor_transport_errors_total` (counter): failed exchanges by error kind
//! - `adaptor_request_duration_seconds` (histogram): transport latency
//! - `adaptor_decode_failures_total` (counter): undecodable bodies by encoding
//!
//! Recording goes through the `metrics` facade and is a no-op until the
//! embedding application installs a recorder.

use std::time::Instant;

/// Record one exchange that the transport completed.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "adaptor_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("adaptor_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one exchange that ended in a transport error.
pub fn record_transport_error(kind: &'static str, start: Instant) {
    metrics::counter!("adaptor_transport_errors_total", "kind" => kind).increment(1);
    metrics::histogram!("adaptor_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_decode_failure(encoding: &'static str) {
    metrics::counter!("adaptor_decode_failures_total", "encoding" => encoding).increment(1);
}
