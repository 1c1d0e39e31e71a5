//! Explorer client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings used by the HTTP client, the optimistic controller and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the tree API, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// How long an error notice stays visible before it is dismissed.
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            notice_ttl_seconds: default_notice_ttl(),
        }
    }
}

impl ClientConfig {
    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Notice lifetime as a [`Duration`].
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_seconds)
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_notice_ttl() -> u64 {
    4
}
