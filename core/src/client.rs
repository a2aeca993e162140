//! Request building, execution and response decoding for the StartupThreads API.
//!
//! # Design
//! Every verb funnels into `send`, which is `build_request`, a
//! `Transport::execute`, then `parse_response`. The two pure halves are
//! public so tests (and hosts doing their own IO) can use them directly.
//!
//! The verb methods (`get`, `post`, ...) return `Option<Value>`: any failure
//! collapses to `None` after being logged. Use `send` to see the `ApiError`.
//! A JSON `null` response is `Some(Value::Null)`, never `None`.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{ClientConfig, ClientOptions, ACCEPT, USER_AGENT};
use crate::error::ApiError;
use crate::headers::Headers;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::build_query;
use crate::transport::{Transport, TransportSettings, UreqTransport};

/// Request parameters: query string for GET/DELETE, JSON body otherwise.
pub type Params = Map<String, Value>;

/// Blocking client for the StartupThreads API.
///
/// Configuration is instance-scoped and mutated through `&mut self`, so a
/// shared client needs external synchronization.
#[derive(Debug, Clone)]
pub struct RequestClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl RequestClient<UreqTransport> {
    pub fn new() -> Self {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::with_options(ClientOptions {
            token: Some(token.into()),
            ..ClientOptions::default()
        })
    }

    pub fn with_options(options: ClientOptions) -> Self {
        Self {
            config: options.into(),
            transport: UreqTransport,
        }
    }
}

impl Default for RequestClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> RequestClient<T> {
    /// Keep the configuration, swap the transport.
    pub fn with_transport<U: Transport>(self, transport: U) -> RequestClient<U> {
        RequestClient {
            config: self.config,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.config.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Replace the default headers when `reset` is true, otherwise add the
    /// names that are not set yet. Existing defaults win on collision.
    pub fn set_headers(&mut self, headers: Headers, reset: bool) -> &mut Self {
        if reset {
            self.config.headers = headers;
        } else {
            self.config.headers.merge_missing(&headers);
        }
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.config.headers
    }

    pub fn set_verify_tls(&mut self, verify: bool) -> &mut Self {
        self.config.verify_tls = verify;
        self
    }

    pub fn verify_tls(&self) -> bool {
        self.config.verify_tls
    }

    pub fn get(&self, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        self.send_or_none(HttpMethod::Get, path, params, headers)
    }

    pub fn post(&self, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        self.send_or_none(HttpMethod::Post, path, params, headers)
    }

    /// Alias for `post`.
    pub fn create(&self, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        self.post(path, params, headers)
    }

    pub fn put(&self, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        self.send_or_none(HttpMethod::Put, path, params, headers)
    }

    /// Issues a PUT. `params` only needs the changed fields.
    pub fn update(&self, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        self.put(path, params, headers)
    }

    pub fn patch(&self, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        self.send_or_none(HttpMethod::Patch, path, params, headers)
    }

    pub fn delete(&self, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        self.send_or_none(HttpMethod::Delete, path, params, headers)
    }

    fn send_or_none(&self, method: HttpMethod, path: &str, params: &Params, headers: &Headers) -> Option<Value> {
        match self.send(method, path, params, headers) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%method, path, error = %err, "request produced no usable response");
                None
            }
        }
    }

    /// Build, execute and decode one request.
    pub fn send(&self, method: HttpMethod, path: &str, params: &Params, headers: &Headers) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, params, headers)?;
        debug!(%method, url = %request.url, "sending request");

        let settings = TransportSettings {
            verify_tls: self.config.verify_tls,
            ..TransportSettings::default()
        };
        let response = self.transport.execute(&request, settings)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");

        parse_response(response)
    }

    /// Assemble the URL, merged headers and body for one call.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
        headers: &Headers,
    ) -> Result<HttpRequest, ApiError> {
        let mut url = format!("{}/{}", self.config.endpoint, path);
        if method.uses_query() && !params.is_empty() {
            url.push('?');
            url.push_str(&build_query(params));
        }

        let mut merged = headers.clone();
        merged.merge_missing(&self.config.headers);
        merged.set("Accept", ACCEPT);
        merged.set("Content-Type", "application/json");
        if let Some(token) = self.config.token.as_deref().filter(|t| !t.is_empty()) {
            merged.set("Authorization", format!("Token token=\"{token}\""));
        }
        merged.insert_if_absent("User-Agent", USER_AGENT);

        let body = if method.uses_body() {
            Some(serde_json::to_string(params).map_err(|e| ApiError::Serialization(e.to_string()))?)
        } else {
            None
        };

        Ok(HttpRequest {
            method,
            url,
            headers: merged.into_vec(),
            body,
        })
    }
}

/// Decode a response body as JSON, whatever the status code.
pub fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
    if response.body.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
