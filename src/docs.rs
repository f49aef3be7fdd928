use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use devhub_auth::{Identity, MeetingSignature};
use devhub_core::{Environment, ErrorBody, FieldError};

use crate::modules::admin::model::AdminSessionResponse;
use crate::modules::health::model::HealthResponse;
use crate::modules::zoom::model::SignatureRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::zoom::controller::create_signature,
        crate::modules::me::controller::get_me,
        crate::modules::admin::controller::get_admin_session,
        crate::modules::health::controller::health_check,
    ),
    components(
        schemas(
            SignatureRequest,
            MeetingSignature,
            Identity,
            AdminSessionResponse,
            HealthResponse,
            Environment,
            ErrorBody,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Meetings", description = "Meeting SDK signatures"),
        (name = "Authentication", description = "Access token inspection"),
        (name = "Admin", description = "Admin-only endpoints"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "DevHub API",
        version = "0.1.0",
        description = "Backend for the DevHub platform: JWT-guarded endpoints and meeting SDK signatures.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
