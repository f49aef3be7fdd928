//! # DevHub Config
//!
//! Configuration types for the DevHub API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`zoom`]: Meeting SDK credentials
//! - [`admin`]: Admin authorization policy
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address
//!
//! Every `from_env` constructor has a `from_lookup` twin taking the variable
//! lookup as a closure, so tests never touch the process environment.
//!
//! # Example
//!
//! ```ignore
//! use devhub_config::{AdminPolicy, CorsConfig, JwtConfig, ZoomConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let zoom_config = ZoomConfig::from_env();
//! let admin_policy = AdminPolicy::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod admin;
pub mod cors;
pub mod jwt;
pub mod server;
pub mod zoom;

// Re-export commonly used types at crate root
pub use admin::AdminPolicy;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use zoom::ZoomConfig;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Reads a variable, treating blank values as unset.
pub(crate) fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
