//! Request target resolution.

use crate::config::TargetConfig;

/// Where translated requests are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub full_url: String,
    pub host: String,
    pub path: String,
}

impl Target {
    /// Target composed from `host` and `path`.
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            full_url: String::new(),
            host: host.into(),
            path: path.into(),
        }
    }

    /// Target with an explicit URL that is used verbatim.
    pub fn with_full_url(full_url: impl Into<String>) -> Self {
        Self {
            full_url: full_url.into(),
            ..Self::default()
        }
    }

    /// Effective request URL.
    ///
    /// A non-empty `full_url` wins; otherwise `host` without trailing `/`
    /// and `path` without leading `/` are joined by a single `/`.
    pub fn url(&self) -> String {
        if !self.full_url.is_empty() {
            return self.full_url.clone();
        }
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

impl From<&TargetConfig> for Target {
    fn from(config: &TargetConfig) -> Self {
        Self {
            full_url: config.full_url.clone(),
            host: config.host.clone(),
            path: config.path.clone(),
        }
    }
}
