//! JWT (JSON Web Token) utilities for authentication.
//!
//! Access tokens are HS256-signed and carry `{ id, email, role?, iat, exp }`.
//! Verification distinguishes an expired token from any other failure so the
//! auth guard can report them differently.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};

use devhub_config::JwtConfig;
use devhub_core::AppError;

use crate::claims::Claims;

/// Why an access token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Access token expired")]
    Expired,
    #[error("Invalid access token")]
    Invalid,
    #[error("JWT secret is not configured")]
    MissingSecret,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AppError::unauthorized(err.to_string()),
            TokenError::MissingSecret => AppError::configuration(err.to_string()),
        }
    }
}

/// Creates an access token valid for `jwt_config.access_token_expiry` seconds.
///
/// # Errors
///
/// Returns a configuration error when the secret is empty and an internal
/// error if encoding fails.
pub fn create_access_token(
    id: &str,
    email: &str,
    role: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        id: id.to_string(),
        email: email.to_string(),
        role: role.map(str::to_string),
        exp,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs arbitrary access token claims with the configured secret.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    if jwt_config.secret.is_empty() {
        return Err(TokenError::MissingSecret.into());
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {e}")))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// - [`TokenError::MissingSecret`] if the config carries no secret; nothing is
///   verified against an empty key
/// - [`TokenError::Expired`] if the signature is valid but `exp` has passed
/// - [`TokenError::Invalid`] for a bad signature, a malformed token or claims
///   without `id`/`email`
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    if jwt_config.secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}
