use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{Extensions, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejectionReason,
};
use tracing::{debug, error, info, warn};

use devhub_auth::{Claims, Identity, TokenError, verify_token};
use devhub_core::AppError;

use crate::state::AppState;

pub const ACCESS_TOKEN_REQUIRED: &str = "Access token required";
pub const ADMIN_ACCESS_REQUIRED: &str = "Admin access required";

/// Extractor that validates the bearer token and provides the caller's claims.
///
/// Reuses a user already attached by [`require_auth`] so the token is only
/// verified once per request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity::from(&self.0)
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> Option<&str> {
        self.0.role.as_deref()
    }
}

/// Authenticated caller that also passed the admin policy.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

/// Caller identity when a valid token was presented, `None` otherwise.
/// Never rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

async fn bearer_token(parts: &mut Parts, state: &AppState) -> Result<String, AppError> {
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| match rejection.reason() {
                TypedHeaderRejectionReason::Missing => {
                    AppError::unauthorized(ACCESS_TOKEN_REQUIRED)
                }
                _ => TokenError::Invalid.into(),
            })?;

    Ok(bearer.token().to_string())
}

fn attach_user(extensions: &mut Extensions, user: &AuthUser) {
    extensions.insert(user.identity());
    extensions.insert(user.clone());
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts, state).await?;
        let claims = verify_token(&token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(admin) = parts.extensions.get::<AdminUser>() {
            return Ok(admin.clone());
        }

        let user = AuthUser::from_request_parts(parts, state).await?;

        if !state.admin_policy.allows(user.email(), user.role()) {
            warn!(
                user_id = %user.0.id,
                email = %user.email(),
                "Admin access denied"
            );
            return Err(AppError::unauthorized(ADMIN_ACCESS_REQUIRED));
        }

        info!(
            target: "audit",
            user_id = %user.0.id,
            email = %user.email(),
            method = %parts.method,
            path = %parts.uri.path(),
            "Admin access granted"
        );

        Ok(AdminUser(user))
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuthUser(Some(user))),
            Err(AppError::Unauthorized(message)) if message == ACCESS_TOKEN_REQUIRED => {
                debug!("No access token presented, continuing anonymously");
                Ok(OptionalAuthUser(None))
            }
            Err(AppError::Unauthorized(message)) => {
                warn!(reason = %message, "Ignoring unusable access token");
                Ok(OptionalAuthUser(None))
            }
            Err(e) => {
                error!(error = %e, "Cannot verify access token, continuing anonymously");
                Ok(OptionalAuthUser(None))
            }
        }
    }
}

/// Rejects the request unless it carries a valid access token, then attaches
/// the caller's [`Identity`] to the request extensions.
///
/// ```rust,ignore
/// let me_routes = init_auth_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let user = AuthUser::from_request_parts(&mut parts, &state).await?;
    attach_user(&mut parts.extensions, &user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Like [`require_auth`], and additionally requires the admin policy to
/// accept the caller. Every grant is written to the `audit` log target.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let admin = AdminUser::from_request_parts(&mut parts, &state).await?;
    attach_user(&mut parts.extensions, &admin.0);
    parts.extensions.insert(admin);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
