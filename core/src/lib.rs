//! Blocking client for the StartupThreads REST API.
//!
//! # Overview
//! `RequestClient` holds the token, endpoint, default headers and TLS flag,
//! and exposes one method per HTTP verb. Every verb goes through the same
//! routine: build an `HttpRequest`, run it through a `Transport`, decode the
//! body as JSON.
//!
//! # Design
//! - Request building and response decoding are pure and public; only the
//!   `Transport` touches the network (`UreqTransport` by default).
//! - Verb methods return `Option<Value>` with `None` as the "no usable
//!   response" marker. `RequestClient::send` returns the typed `ApiError`.
//! - Header merging is first-write-wins, case-insensitive. The `Accept`,
//!   `Content-Type` and `Authorization` headers are always forced last.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod query;
pub mod transport;

pub use client::{parse_response, Params, RequestClient};
pub use config::{ClientConfig, ClientOptions, DEFAULT_ENDPOINT};
pub use error::ApiError;
pub use headers::Headers;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, TransportSettings, UreqTransport};
