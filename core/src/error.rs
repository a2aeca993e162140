//! Error types for the StartupThreads client.
//!
//! # Design
//! The API never distinguishes "the server answered with an error payload"
//! from "the server answered", so HTTP status codes are not errors here. A
//! response with a non-2xx status and a JSON body decodes like any other.
//! Everything below is a failure to obtain a usable JSON value at all.

/// Errors returned by `RequestClient::send` and its building blocks.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// DNS, connect, TLS, redirect or timeout failure in the transport.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with no body.
    #[error("response body was empty")]
    EmptyBody,

    /// The response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request params could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A header name or value the transport refused to send.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
