//! Central failure handling.
//!
//! Handlers and extractors return [`AppError`], which renders a
//! production-safe body and leaves an [`ErrorReport`] in the response
//! extensions. [`handle_errors`] is the one place those reports are logged
//! and, outside production, re-rendered with the error message and stack.
//! [`panic_response`] turns a handler panic into the same pipeline.

use std::any::Any;

use anyhow::anyhow;
use axum::{
    Json,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use devhub_core::{AppError, Environment, ErrorReport};
use devhub_observability::client_ip;

pub async fn handle_errors(
    State(environment): State<Environment>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let client = client_ip(req.headers(), req.extensions());

    let mut response = next.run(req).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };
    let error = report.error();
    let status = response.status();

    if status.is_server_error() {
        error!(
            method = %method,
            url = %uri,
            client = %client,
            status = status.as_u16(),
            kind = error.kind(),
            error = %error,
            stack = %error.stack(),
            "Request failed"
        );
    } else {
        warn!(
            method = %method,
            url = %uri,
            client = %client,
            status = status.as_u16(),
            kind = error.kind(),
            error = %error,
            stack = %error.stack(),
            "Request rejected"
        );
    }

    if environment.is_production() || !status.is_server_error() {
        return response;
    }

    let (status, body) = error.render(environment);
    let (_, rendered) = (status, Json(body)).into_response().into_parts();
    let (mut parts, _) = response.into_parts();
    parts.status = status;
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, rendered)
}

/// Response for a panicking handler; feeds [`handle_errors`] like any other
/// internal error.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(anyhow!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use devhub_observability::capture::capture_logs;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn broken() -> Result<&'static str, AppError> {
        Err(AppError::internal(anyhow!("pool exhausted")))
    }

    async fn missing() -> Result<&'static str, AppError> {
        Err(AppError::not_found("Meeting not found"))
    }

    fn app(environment: Environment) -> Router {
        Router::new()
            .route("/broken", get(broken))
            .route("/missing", get(missing))
            .layer(middleware::from_fn_with_state(environment, handle_errors))
    }

    async fn call(environment: Environment, uri: &str) -> (StatusCode, Value) {
        let response = app(environment)
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_production_hides_defect_details() {
        let (status, body) = call(Environment::Production, "/broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("stack").is_none());
    }

    #[tokio::test]
    async fn test_development_shows_message_and_stack() {
        let (status, body) = call(Environment::Development, "/broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "pool exhausted");
        assert!(body["stack"].as_str().unwrap().contains("pool exhausted"));
    }

    #[tokio::test]
    async fn test_operational_errors_are_identical_everywhere() {
        for environment in [Environment::Production, Environment::Development] {
            let (status, body) = call(environment, "/missing").await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, serde_json::json!({ "error": "Meeting not found" }));
        }
    }

    #[tokio::test]
    async fn test_client_failure_logged_with_context_and_stack() {
        let (logs, _guard) = capture_logs();

        let (status, _) = call(Environment::Production, "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let lines = logs.lines_with(&["WARN", "Request rejected"]);
        assert_eq!(lines.len(), 1, "{}", logs.contents());
        for field in [
            "method=GET",
            "url=/missing",
            "client=unknown",
            "status=404",
            "stack=",
        ] {
            assert!(lines[0].contains(field), "missing {field} in {}", lines[0]);
        }
    }

    #[tokio::test]
    async fn test_server_failure_logged_with_context_and_stack() {
        let (logs, _guard) = capture_logs();

        let (status, _) = call(Environment::Production, "/broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let lines = logs.lines_with(&["ERROR", "Request failed"]);
        assert_eq!(lines.len(), 1, "{}", logs.contents());
        assert!(lines[0].contains("method=GET"));
        assert!(lines[0].contains("url=/broken"));
        assert!(lines[0].contains("client=unknown"));
        assert!(lines[0].contains("stack=pool exhausted"));
    }

    #[test]
    fn test_panic_payload_becomes_internal_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert!(report.error().to_string().contains("boom"));
    }
}
