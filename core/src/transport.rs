//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the IO seam. `UreqTransport` is the production
//! implementation; tests substitute fakes that record requests or fail on
//! demand. A `UreqTransport` builds a fresh agent for every call, so the
//! connection lives only for the duration of one request.

use std::time::Duration;

use ureq::config::RedirectAuthHeaders;
use ureq::http::{HeaderName, HeaderValue};
use ureq::tls::TlsConfig;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Timeout applied to the whole round trip, redirects included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-call settings a transport must honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    pub verify_tls: bool,
    pub timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            verify_tls: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Performs one blocking HTTP round trip.
///
/// Implementations return any HTTP status as an `HttpResponse`; only failures
/// to get a response at all are errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest, settings: TransportSettings) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a blocking `ureq` agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    fn agent(settings: TransportSettings) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(settings.timeout))
            .redirect_auth_headers(RedirectAuthHeaders::SameHost)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!settings.verify_tls)
                    .build(),
            )
            .build()
            .new_agent()
    }
}

fn validate_headers(headers: &[(String, String)]) -> Result<(), ApiError> {
    for (name, value) in headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidHeader(format!("{name}: {e}")))?;
        HeaderValue::from_str(value)
            .map_err(|e| ApiError::InvalidHeader(format!("{name}: {e}")))?;
    }
    Ok(())
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest, settings: TransportSettings) -> Result<HttpResponse, ApiError> {
        validate_headers(&req.headers)?;
        let agent = Self::agent(settings);
        let url = req.url.as_str();
        let body = req.body.as_deref();

        let result = match (req.method, body) {
            (HttpMethod::Get, _) => with_headers(agent.get(url), &req.headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(url), &req.headers).call(),
            (HttpMethod::Post, Some(b)) => with_headers(agent.post(url), &req.headers).send(b.as_bytes()),
            (HttpMethod::Post, None) => with_headers(agent.post(url), &req.headers).send_empty(),
            (HttpMethod::Put, Some(b)) => with_headers(agent.put(url), &req.headers).send(b.as_bytes()),
            (HttpMethod::Put, None) => with_headers(agent.put(url), &req.headers).send_empty(),
            (HttpMethod::Patch, Some(b)) => with_headers(agent.patch(url), &req.headers).send(b.as_bytes()),
            (HttpMethod::Patch, None) => with_headers(agent.patch(url), &req.headers).send_empty(),
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse { status, body })
    }
}
