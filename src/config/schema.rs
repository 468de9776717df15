//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for an adaptor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdaptorConfig {
    /// Where requests are sent and how long to wait.
    pub target: TargetConfig,

    /// Standard-request buffering limits.
    pub request: RequestConfig,

    /// Response content decoding behavior.
    pub decoding: DecodingConfig,

    /// Fast object pool sizing.
    pub pool: PoolConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Used verbatim as the request URL when non-empty.
    pub full_url: String,

    /// Base URL (e.g., "http://example.com").
    pub host: String,

    /// Path joined onto `host` when `full_url` is empty.
    pub path: String,

    /// Total time allowed for one exchange, in milliseconds.
    pub timeout_ms: u64,
}

impl TargetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            full_url: String::new(),
            host: String::new(),
            path: String::new(),
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RequestConfig {
    /// Optional cap on buffered standard-request bodies. Unset means the
    /// whole body is always buffered; a larger body is sent empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_body_bytes: Option<usize>,
}

/// What to do with a gzip/deflate payload that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPayloadPolicy {
    /// Degrade to an absent body.
    #[default]
    Degrade,
    /// Hand back the undecoded bytes.
    Raw,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DecodingConfig {
    pub corrupt_payload: CorruptPayloadPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Released request/response objects kept for reuse (each).
    pub max_idle: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_idle: 256 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "http_adaptor=info".to_string(),
        }
    }
}
