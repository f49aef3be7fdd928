use devhub_config::{AdminPolicy, ConfigError, CorsConfig, JwtConfig, ZoomConfig};
use devhub_core::Environment;

#[derive(Clone, Debug)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub zoom_config: ZoomConfig,
    pub admin_policy: AdminPolicy,
    pub cors_config: CorsConfig,
    pub environment: Environment,
}

/// Builds the shared state from the process environment.
///
/// # Errors
///
/// Fails when `JWT_SECRET` is missing or blank, or `JWT_ACCESS_EXPIRY` is not
/// a number. The server refuses to start without a signing secret.
pub fn init_app_state() -> Result<AppState, ConfigError> {
    Ok(AppState {
        jwt_config: JwtConfig::from_env()?,
        zoom_config: ZoomConfig::from_env(),
        admin_policy: AdminPolicy::from_env(),
        cors_config: CorsConfig::from_env(),
        environment: Environment::from_env(),
    })
}
