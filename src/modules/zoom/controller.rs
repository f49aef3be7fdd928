use axum::{Json, extract::State};
use chrono::Utc;
use tracing::{info, instrument};

use devhub_auth::{MeetingSignature, issue_meeting_signature};
use devhub_core::{AppError, ErrorBody};

use crate::middleware::auth::OptionalAuthUser;
use crate::modules::zoom::model::SignatureRequest;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Issue a signature for joining a meeting through the web SDK
///
/// A bearer token is optional; when a valid one is sent the caller is logged.
#[utoipa::path(
    post,
    path = "/api/zoom/signature",
    request_body = SignatureRequest,
    responses(
        (status = 200, description = "Signature issued", body = MeetingSignature),
        (status = 400, description = "Missing meeting number or invalid body", body = ErrorBody),
        (status = 500, description = "SDK credentials are not configured", body = ErrorBody)
    ),
    security(
        (),
        ("bearer_auth" = [])
    ),
    tag = "Meetings"
)]
#[instrument(skip(state, caller, dto))]
pub async fn create_signature(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    ValidatedJson(dto): ValidatedJson<SignatureRequest>,
) -> Result<Json<MeetingSignature>, AppError> {
    let signature = issue_meeting_signature(
        dto.meeting_number.as_deref().unwrap_or_default(),
        dto.role.unwrap_or(0),
        &state.zoom_config,
        Utc::now().timestamp(),
    )?;

    info!(
        caller = caller.as_ref().map(|user| user.email()),
        role = dto.role.unwrap_or(0),
        "Meeting signature issued"
    );

    Ok(Json(signature))
}
