use crate::docs::ApiDoc;
use crate::middleware::auth::{require_admin, require_auth};
use crate::middleware::errors::{handle_errors, panic_response};
use crate::modules::admin::router::init_admin_router;
use crate::modules::health::router::init_health_router;
use crate::modules::me::router::init_me_router;
use crate::modules::zoom::router::init_zoom_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use devhub_core::AppError;
use devhub_observability::{RequestLogger, log_requests};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

/// Builds the application.
///
/// Layers run outermost first: request logger, CORS, error handler, panic
/// catcher, then the per-route auth guards and the handler.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/zoom", init_zoom_router())
                .nest(
                    "/auth",
                    init_me_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
                )
                .nest(
                    "/admin",
                    init_admin_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .merge(init_health_router()),
        )
        .fallback(route_not_found)
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(state.environment, handle_errors))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn_with_state(
            RequestLogger::new(state.environment.is_production()),
            log_requests,
        ))
}
