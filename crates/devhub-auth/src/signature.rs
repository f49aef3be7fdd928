//! Signed join tokens for the third-party meeting SDK.
//!
//! The browser SDK needs a short-lived HS256 token signed with the SDK secret.
//! [`issue_meeting_signature`] is the only place such a token is built; the
//! HTTP endpoint and the CLI both call it.

use anyhow::anyhow;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use devhub_config::ZoomConfig;
use devhub_core::AppError;

/// Lifetime of a signature, counted from the moment it is issued.
pub const SIGNATURE_TTL_SECONDS: i64 = 2 * 60 * 60;
/// How far `iat` is backdated to tolerate clock skew on the SDK side.
pub const CLOCK_SKEW_SECONDS: i64 = 30;
pub const SIGNATURE_AUDIENCE: &str = "zoom";

/// Payload of a meeting SDK token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingClaims {
    pub iss: String,
    pub aud: String,
    pub app_key: String,
    pub mn: String,
    pub role: i32,
    pub iat: i64,
    pub exp: i64,
    pub token_exp: i64,
}

impl MeetingClaims {
    pub fn new(sdk_key: &str, meeting_number: &str, role: i32, now: i64) -> Self {
        let exp = now + SIGNATURE_TTL_SECONDS;

        Self {
            iss: sdk_key.to_string(),
            aud: SIGNATURE_AUDIENCE.to_string(),
            app_key: sdk_key.to_string(),
            mn: meeting_number.to_string(),
            role,
            iat: now - CLOCK_SKEW_SECONDS,
            exp,
            token_exp: exp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSignature {
    /// Three-part HS256 token for the meeting SDK
    pub signature: String,
    /// The SDK key the signature was produced with
    pub sdk_key: String,
}

/// Signs a meeting SDK token for `meeting_number` at unix time `now`.
///
/// # Errors
///
/// - validation error if `meeting_number` is empty or blank
/// - configuration error if the SDK key or secret is missing
pub fn issue_meeting_signature(
    meeting_number: &str,
    role: i32,
    config: &ZoomConfig,
    now: i64,
) -> Result<MeetingSignature, AppError> {
    let meeting_number = meeting_number.trim();
    if meeting_number.is_empty() {
        return Err(AppError::validation("meetingNumber is required"));
    }

    let (sdk_key, sdk_secret) = config
        .credentials()
        .ok_or_else(|| AppError::configuration("Zoom SDK credentials are not configured"))?;

    let claims = MeetingClaims::new(sdk_key, meeting_number, role, now);

    let signature = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(sdk_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to sign meeting token: {e}")))?;

    Ok(MeetingSignature {
        signature,
        sdk_key: sdk_key.to_string(),
    })
}
