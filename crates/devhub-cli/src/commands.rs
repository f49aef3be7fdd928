use chrono::Utc;

use devhub_auth::{create_access_token, issue_meeting_signature};
use devhub_config::{JwtConfig, ZoomConfig};
use devhub_core::AppError;

/// Signs an access token for `id`/`email`.
///
/// `expires_in` overrides the configured lifetime in seconds.
pub fn issue_token(
    id: &str,
    email: &str,
    role: Option<&str>,
    expires_in: Option<i64>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    if expires_in.is_some_and(|seconds| seconds <= 0) {
        return Err(AppError::validation("expires-in must be a positive number of seconds"));
    }

    let jwt_config = JwtConfig {
        access_token_expiry: expires_in.unwrap_or(jwt_config.access_token_expiry),
        ..jwt_config.clone()
    };

    create_access_token(id, email, role, &jwt_config)
}

/// Issues a meeting signature and renders the `{ signature, sdkKey }` body.
pub fn sign_meeting(
    meeting_number: &str,
    role: i32,
    zoom_config: &ZoomConfig,
) -> anyhow::Result<String> {
    let signature =
        issue_meeting_signature(meeting_number, role, zoom_config, Utc::now().timestamp())?;

    Ok(serde_json::to_string_pretty(&signature)?)
}
