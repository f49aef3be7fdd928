#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use devhub::devhub_auth::{Claims, create_access_token, encode_claims};
use devhub::devhub_config::{AdminPolicy, CorsConfig, JwtConfig, ZoomConfig};
use devhub::devhub_core::Environment;
use devhub::router::init_router;
use devhub::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;

pub const TEST_JWT_SECRET: &str = "integration_test_secret_key";
pub const TEST_SDK_KEY: &str = "test-sdk-key";
pub const TEST_SDK_SECRET: &str = "test-sdk-secret";
pub const ADMIN_EMAIL: &str = "ops@devhub.test";

pub fn test_state(environment: Environment) -> AppState {
    AppState {
        jwt_config: JwtConfig::new(TEST_JWT_SECRET),
        zoom_config: ZoomConfig::new(TEST_SDK_KEY, TEST_SDK_SECRET),
        admin_policy: AdminPolicy::default().with_emails([ADMIN_EMAIL]),
        cors_config: CorsConfig::default(),
        environment,
    }
}

pub fn setup_test_app() -> Router {
    init_router(test_state(Environment::Test))
}

pub fn setup_test_app_with(state: AppState) -> Router {
    init_router(state)
}

pub fn generate_token(id: &str, email: &str, role: Option<&str>) -> String {
    create_access_token(id, email, role, &JwtConfig::new(TEST_JWT_SECRET)).unwrap()
}

pub fn generate_expired_token(id: &str, email: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        id: id.to_string(),
        email: email.to_string(),
        role: None,
        exp: now - 3600,
        iat: now - 7200,
    };
    encode_claims(&claims, &JwtConfig::new(TEST_JWT_SECRET)).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
