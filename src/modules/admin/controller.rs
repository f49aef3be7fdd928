use axum::Json;
use tracing::instrument;

use devhub_core::ErrorBody;

use crate::middleware::auth::AdminUser;
use crate::modules::admin::model::AdminSessionResponse;

/// Confirm the caller holds an admin session
#[utoipa::path(
    get,
    path = "/api/admin/session",
    responses(
        (status = 200, description = "Caller is an admin", body = AdminSessionResponse),
        (status = 401, description = "Missing token, invalid token or not an admin", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip(admin))]
pub async fn get_admin_session(AdminUser(admin): AdminUser) -> Json<AdminSessionResponse> {
    let identity = admin.identity();

    Json(AdminSessionResponse {
        id: identity.id,
        email: identity.email,
        admin: true,
    })
}
