use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use devhub_core::AppError;

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Every failure becomes an [`AppError`], so malformed bodies get the same
/// `{ "error": ... }` envelope as everything else:
///
/// - body over the size limit: 413
/// - malformed JSON, wrong types, missing content type: 400 with a message
/// - rule violations: 400 with one `details` entry per field
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(rejection.body_text());
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::validation("Missing 'Content-Type: application/json' header");
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::validation(format!("{field} is required"));
    }

    if error_msg.contains("invalid type") {
        return AppError::validation("Invalid field type in request");
    }

    if matches!(rejection, JsonRejection::JsonSyntaxError(_)) {
        return AppError::validation("Malformed JSON in request body");
    }

    AppError::validation("Invalid request body")
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
