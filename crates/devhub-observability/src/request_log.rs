//! HTTP request/response logging middleware.
//!
//! Logs every request on entry and on completion. Bodies are logged with
//! credentials redacted: request bodies for every non-GET request, response
//! bodies for failures (and for every response outside production).
//!
//! Logging never changes what the client receives. Bodies are only buffered
//! when they are JSON and declare a size of at most [`MAX_LOGGED_BODY_BYTES`];
//! buffered bytes are handed on unchanged and anything else streams through
//! untouched. A body that fails while being buffered is never replaced by an
//! empty one: the request is answered with an internal error instead.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//! use devhub_observability::{RequestLogger, log_requests};
//!
//! let app = Router::new()
//!     .route("/api/health", get(health))
//!     .layer(middleware::from_fn_with_state(RequestLogger::new(false), log_requests));
//! ```

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{Body, HttpBody},
    extract::{ConnectInfo, Request, State},
    http::{Extensions, HeaderMap, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use devhub_core::AppError;
use http_body_util::{BodyExt, Limited};
use tracing::{error, info, warn};

use crate::redact::redacted_body;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const MAX_LOGGED_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Copy, Debug)]
pub struct RequestLogger {
    /// Log response bodies of successful requests too
    pub log_success_bodies: bool,
}

impl RequestLogger {
    pub fn new(production: bool) -> Self {
        Self {
            log_success_bodies: !production,
        }
    }
}

/// Best-effort client address: first `X-Forwarded-For` hop, then the socket
/// peer, then `unknown`.
pub fn client_ip(headers: &HeaderMap, extensions: &Extensions) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(forwarded) = forwarded {
        return forwarded.to_string();
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_lowercase();
            value.starts_with("application/json") || value.contains("+json")
        })
        .unwrap_or(false)
}

/// Buffers a loggable body and returns it together with its log rendering.
///
/// # Errors
///
/// Returns the transport error if a JSON body fails while being read.
async fn capture_body(headers: &HeaderMap, body: Body) -> Result<(Body, String), BoxError> {
    if body.size_hint().exact() == Some(0) {
        return Ok((body, "<empty>".to_string()));
    }

    if !is_json(headers) {
        return Ok((body, "<non-JSON body not logged>".to_string()));
    }

    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= MAX_LOGGED_BODY_BYTES as u64);
    if !fits {
        return Ok((body, "<body too large to log>".to_string()));
    }

    let bytes = Limited::new(body, MAX_LOGGED_BODY_BYTES)
        .collect()
        .await?
        .to_bytes();
    let logged = redacted_body(&bytes);

    Ok((Body::from(bytes), logged))
}

pub async fn log_requests(
    State(logger): State<RequestLogger>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let client = client_ip(req.headers(), req.extensions());
    let request_id = uuid::Uuid::new_v4().to_string();

    let req = if method == Method::GET {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            client = %client,
            "Incoming request"
        );
        req
    } else {
        let (parts, body) = req.into_parts();
        let (body, logged_body) = match capture_body(&parts.headers, body).await {
            Ok(captured) => captured,
            Err(e) => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    client = %client,
                    error = %e,
                    "Failed to read request body"
                );
                return AppError::internal(std::io::Error::other(e)).into_response();
            }
        };
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            client = %client,
            body = %logged_body,
            "Incoming request"
        );
        Request::from_parts(parts, body)
    };

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if status < 400 && !logger.log_success_bodies {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            "Request completed"
        );
        return response;
    }

    let (parts, body) = response.into_parts();
    let (body, logged_body) = match capture_body(&parts.headers, body).await {
        Ok(captured) => captured,
        Err(e) => {
            error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status,
                error = %e,
                "Failed to read response body"
            );
            return AppError::internal(std::io::Error::other(e)).into_response();
        }
    };

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            body = %logged_body,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            body = %logged_body,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            body = %logged_body,
            "Request completed"
        ),
    }

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::capture_logs;
    use axum::{Json, Router, http::StatusCode, middleware, routing::post};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    async fn reject() -> (StatusCode, Json<Value>) {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": "nope", "token": "t" })))
    }

    /// A JSON body that declares 2 bytes but fails with a length error.
    fn failing_body() -> Body {
        Body::new(Limited::new(Body::from(r#"{"a":1}"#), 2))
    }

    async fn broken_stream() -> Response {
        axum::http::Response::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(failing_body())
            .unwrap()
    }

    fn app(production: bool) -> Router {
        Router::new()
            .route("/echo", post(echo))
            .route("/reject", post(reject))
            .route("/broken-stream", post(broken_stream))
            .layer(middleware::from_fn_with_state(
                RequestLogger::new(production),
                log_requests,
            ))
    }

    fn json_request(uri: &str, body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_bodies_pass_through_unchanged() {
        let payload = r#"{"password":"hunter2","nested":{"token":"abc"},"n":1}"#;
        let response = app(false)
            .oneshot(json_request("/echo", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::from_str::<Value>(payload).unwrap());
    }

    #[tokio::test]
    async fn test_error_response_unchanged_in_production() {
        let response = app(true)
            .oneshot(json_request("/reject", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "nope", "token": "t" }));
    }

    #[tokio::test]
    async fn test_entry_line_logs_redacted_body() {
        let (logs, _guard) = capture_logs();
        let payload = r#"{"email":"a@b.io","password":"hunter2","nested":{"token":"abc"}}"#;

        let response = app(true)
            .oneshot(json_request("/echo", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let entry = logs.lines_with(&["Incoming request", "method=POST", "path=/echo"]);
        assert_eq!(entry.len(), 1, "{}", logs.contents());
        assert!(entry[0].contains(r#""password":"[REDACTED]""#));
        assert!(entry[0].contains(r#""token":"[REDACTED]""#));
        assert!(entry[0].contains(r#""email":"a@b.io""#));
        assert!(!logs.contents().contains("hunter2"));
        assert!(!logs.contents().contains(r#""abc""#));
    }

    #[tokio::test]
    async fn test_failure_response_body_is_logged_redacted() {
        let (logs, _guard) = capture_logs();

        let response = app(true)
            .oneshot(json_request("/reject", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let lines = logs.lines_with(&["WARN", "Client error", "status=400"]);
        assert_eq!(lines.len(), 1, "{}", logs.contents());
        assert!(lines[0].contains(r#""token":"[REDACTED]""#));
        assert!(lines[0].contains(r#""error":"nope""#));
    }

    #[tokio::test]
    async fn test_unreadable_request_body_is_not_replaced() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/echo")
            .header("content-type", "application/json")
            .body(failing_body())
            .unwrap();

        let response = app(false).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_unreadable_response_body_becomes_internal_error() {
        let response = app(false)
            .oneshot(json_request("/broken-stream", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, &Extensions::new()), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_peer_then_unknown() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, &Extensions::new()), "unknown");

        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        assert_eq!(client_ip(&headers, &extensions), "127.0.0.1");
    }

    #[test]
    fn test_is_json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "application/problem+json".parse().unwrap());
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "multipart/form-data".parse().unwrap());
        assert!(!is_json(&headers));
    }
}
