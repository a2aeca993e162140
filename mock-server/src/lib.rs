use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// How long `/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// What the server saw, returned as the response body of every unmatched route.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Lower-cased header names.
    pub headers: BTreeMap<String, String>,
    /// Request body parsed as JSON, `None` when empty or not JSON.
    pub body: Option<Value>,
    pub raw_body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/empty", any(empty))
        .route("/malformed", any(malformed))
        .route("/redirect", any(redirect))
        .route("/status/{code}", any(status))
        .route("/slow", any(slow))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    tracing::debug!(%method, %uri, "echo");
    let headers = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect();
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: serde_json::from_str(&body).ok(),
        raw_body: body,
    })
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn malformed() -> &'static str {
    "<html>not json</html>"
}

async fn redirect() -> Redirect {
    Redirect::temporary("/redirected")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(SLOW_DELAY).await;
    Json(json!({ "slow": true }))
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    let code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, Json(json!({ "error": code.canonical_reason().unwrap_or("unknown") })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_serializes_lowercase_fields() {
        let echo = Echo {
            method: "GET".to_string(),
            path: "/items".to_string(),
            query: Some("page=2".to_string()),
            headers: BTreeMap::from([("accept".to_string(), "application/json".to_string())]),
            body: None,
            raw_body: String::new(),
        };
        let json = serde_json::to_value(&echo).unwrap();
        assert_eq!(json["method"], "GET");
        assert_eq!(json["query"], "page=2");
        assert_eq!(json["headers"]["accept"], "application/json");
        assert!(json["body"].is_null());
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let echo = Echo {
            method: "POST".to_string(),
            path: "/inventory_shipments".to_string(),
            query: None,
            headers: BTreeMap::new(),
            body: Some(json!({"sku": "TS-1"})),
            raw_body: r#"{"sku":"TS-1"}"#.to_string(),
        };
        let back: Echo = serde_json::from_str(&serde_json::to_string(&echo).unwrap()).unwrap();
        assert_eq!(back, echo);
    }
}
