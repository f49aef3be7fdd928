//! Application error taxonomy.
//!
//! Every failure a handler or middleware can produce is an [`AppError`]. The
//! set is closed: [`AppError::render`] resolves each variant to a status code
//! and an [`ErrorBody`] in a single ordered `match`, so adding a variant is a
//! compile-time checked change.
//!
//! Resolution order:
//!
//! 1. schema validation failures: 400 with one `details` entry per field
//! 2. typed operational failures: their own status and message
//! 3. known persistence failures: 400 with a generic message
//! 4. upload failures (file size / unexpected field): 413 / 400
//! 5. everything else: 500, message and stack hidden in production
//!
//! [`IntoResponse`] always renders the production-safe body and attaches an
//! [`ErrorReport`] to the response extensions. The error handling middleware
//! picks the report up to log it with the request context and to re-render it
//! for non-production environments.

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::environment::Environment;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const DATABASE_ERROR_MESSAGE: &str = "Invalid database request";
const FILE_TOO_LARGE_MESSAGE: &str = "File too large";
const UNEXPECTED_FIELD_MESSAGE: &str = "Unexpected field in upload";
const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// A single failed field of a schema-validated request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Uniform JSON error envelope returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            stack: None,
        }
    }
}

/// Failures reported by the persistence client.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The store rejected a well-formed request (constraint violation, missing row).
    #[error("known request error {code}: {message}")]
    KnownRequest { code: String, message: String },
    /// The store rejected the shape of the query or its arguments.
    #[error("query validation error: {0}")]
    Validation(String),
    /// Connection loss, pool exhaustion and anything the client could not classify.
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("validation failed on {} field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnexpectedField(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    /// Expected failures whose message is safe to show to the client as-is.
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::NotFound(_)
                | AppError::Unauthorized(_)
                | AppError::Forbidden(_)
        )
    }

    /// Short, stable name of the variant for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::InvalidFields(_) => "invalid_fields",
            AppError::Database(_) => "database",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::UnexpectedField(_) => "unexpected_field",
            AppError::Configuration(_) => "configuration",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        self.render(Environment::Production).0
    }

    /// Cause chain of the failure, the closest thing to a stack trace a
    /// Rust error carries. Includes a backtrace when one was captured.
    pub fn stack(&self) -> String {
        match self {
            AppError::Internal(err) | AppError::Database(DatabaseError::Other(err)) => {
                format!("{err:?}")
            }
            other => format!("{other:?}"),
        }
    }

    pub fn render(&self, environment: Environment) -> (StatusCode, ErrorBody) {
        match self {
            AppError::InvalidFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: VALIDATION_FAILED_MESSAGE.to_string(),
                    details: Some(fields.clone()),
                    stack: None,
                },
            ),

            AppError::Validation(message) => (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorBody::new(message)),
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ErrorBody::new(message))
            }
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, ErrorBody::new(message)),

            AppError::Database(DatabaseError::KnownRequest { .. })
            | AppError::Database(DatabaseError::Validation(_)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(DATABASE_ERROR_MESSAGE),
            ),

            AppError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody::new(FILE_TOO_LARGE_MESSAGE),
            ),
            AppError::Internal(err) if mentions_file_size(&format!("{err:#}")) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody::new(FILE_TOO_LARGE_MESSAGE),
            ),
            AppError::UnexpectedField(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(UNEXPECTED_FIELD_MESSAGE),
            ),
            AppError::Internal(err) if mentions_unexpected_field(&format!("{err:#}")) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(UNEXPECTED_FIELD_MESSAGE),
            ),

            AppError::Database(DatabaseError::Other(_))
            | AppError::Configuration(_)
            | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.render_defect(environment),
            ),
        }
    }

    fn render_defect(&self, environment: Environment) -> ErrorBody {
        if environment.is_production() {
            return ErrorBody::new(INTERNAL_ERROR_MESSAGE);
        }

        ErrorBody {
            error: self.to_string(),
            details: None,
            stack: Some(self.stack()),
        }
    }
}

fn mentions_file_size(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("file too large") || message.contains("file size")
}

fn mentions_unexpected_field(message: &str) -> bool {
    message.to_lowercase().contains("unexpected field")
}

fn collect_field_errors(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let message = field_errors
                    .iter()
                    .find_map(|error| error.message.as_ref().map(|msg| msg.to_string()))
                    .unwrap_or_else(|| format!("{path} is invalid"));
                out.push(FieldError {
                    field: path,
                    message,
                });
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(Some(&path), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(Some(&format!("{path}[{index}]")), inner, out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors(None, &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::InvalidFields(fields)
    }
}

/// The failure behind an error response, carried in the response extensions.
#[derive(Debug, Clone)]
pub struct ErrorReport(Arc<AppError>);

impl ErrorReport {
    pub fn error(&self) -> &AppError {
        &self.0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.render(Environment::Production);
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport(Arc::new(self)));
        response
    }
}
