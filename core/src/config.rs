//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// Base URL used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.startupthreads.com";

/// Versioned media type sent as `Accept` on every request.
pub const ACCEPT: &str = "application/vnd.startupthreads-v1+json";

/// Sent as `User-Agent` unless the caller supplies one.
pub const USER_AGENT: &str = concat!("StartupThreads-Rust/", env!("CARGO_PKG_VERSION"));

/// Construction-time options. Every field is optional.
///
/// An empty `endpoint` is ignored. Non-empty `headers` replace the default
/// header set rather than merging into it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    pub token: Option<String>,
    pub endpoint: Option<String>,
    pub headers: Headers,
}

/// Mutable state owned by a `RequestClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token: Option<String>,
    pub endpoint: String,
    pub headers: Headers,
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            headers: Headers::new(),
            verify_tls: true,
        }
    }
}

impl From<ClientOptions> for ClientConfig {
    fn from(options: ClientOptions) -> Self {
        let mut config = ClientConfig {
            token: options.token,
            ..ClientConfig::default()
        };
        if let Some(endpoint) = options.endpoint.filter(|e| !e.is_empty()) {
            config.endpoint = endpoint;
        }
        if !options.headers.is_empty() {
            config.headers = options.headers;
        }
        config
    }
}
