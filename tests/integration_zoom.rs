mod common;

use axum::http::StatusCode;
use common::{
    TEST_SDK_KEY, TEST_SDK_SECRET, body_json, generate_token, json_request, setup_test_app,
    setup_test_app_with, test_state,
};
use devhub::devhub_auth::MeetingClaims;
use devhub::devhub_config::ZoomConfig;
use devhub::devhub_core::Environment;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::json;
use tower::ServiceExt;

fn decode_signature(signature: &str) -> MeetingClaims {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["zoom"]);
    decode::<MeetingClaims>(
        signature,
        &DecodingKey::from_secret(TEST_SDK_SECRET.as_bytes()),
        &validation,
    )
    .unwrap()
    .claims
}

#[tokio::test]
async fn test_signature_without_token() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "/api/zoom/signature",
            &json!({ "meetingNumber": "85746065432", "role": 1 }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["sdkKey"], TEST_SDK_KEY);

    let claims = decode_signature(body["signature"].as_str().unwrap());
    assert_eq!(claims.mn, "85746065432");
    assert_eq!(claims.role, 1);
    assert_eq!(claims.app_key, TEST_SDK_KEY);
    assert_eq!(claims.exp - claims.iat, 7230);
}

#[tokio::test]
async fn test_signature_accepts_numeric_meeting_number() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "/api/zoom/signature",
            &json!({ "meetingNumber": 123456789 }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let claims = decode_signature(body["signature"].as_str().unwrap());
    assert_eq!(claims.mn, "123456789");
    assert_eq!(claims.role, 0);
}

#[tokio::test]
async fn test_signature_with_valid_and_invalid_tokens() {
    let token = generate_token("1", "dev@devhub.test", None);

    for token in [token.as_str(), "not-a-token"] {
        let response = setup_test_app()
            .oneshot(json_request(
                "/api/zoom/signature",
                &json!({ "meetingNumber": "42" }),
                Some(token),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_signature_missing_meeting_number() {
    for payload in [json!({}), json!({ "meetingNumber": "" }), json!({ "meetingNumber": "  " })] {
        let response = setup_test_app()
            .oneshot(json_request("/api/zoom/signature", &payload, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "meetingNumber is required" })
        );
    }
}

#[tokio::test]
async fn test_signature_rejects_unknown_role() {
    let response = setup_test_app()
        .oneshot(json_request(
            "/api/zoom/signature",
            &json!({ "meetingNumber": "42", "role": 7 }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "role");
    assert_eq!(
        body["details"][0]["message"],
        "role must be 0 (participant) or 1 (host)"
    );
}

#[tokio::test]
async fn test_signature_without_credentials_in_production() {
    let mut state = test_state(Environment::Production);
    state.zoom_config = ZoomConfig::default();

    let response = setup_test_app_with(state)
        .oneshot(json_request(
            "/api/zoom/signature",
            &json!({ "meetingNumber": "42" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn test_signature_without_credentials_in_development() {
    let mut state = test_state(Environment::Development);
    state.zoom_config = ZoomConfig::default();

    let response = setup_test_app_with(state)
        .oneshot(json_request(
            "/api/zoom/signature",
            &json!({ "meetingNumber": "42" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Zoom SDK credentials are not configured")
    );
    assert!(body.get("stack").is_some());
}
