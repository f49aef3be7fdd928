use axum::Json;
use tracing::instrument;

use devhub_auth::Identity;
use devhub_core::ErrorBody;

use crate::middleware::auth::AuthUser;

/// Get the identity behind the presented access token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Verified identity", body = Identity),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(auth_user))]
pub async fn get_me(auth_user: AuthUser) -> Json<Identity> {
    Json(auth_user.identity())
}
