use std::fmt;

use crate::{ConfigError, env_lookup, non_blank};

const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600; // 1 hour

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
        }
    }

    /// Loads the config, failing when `JWT_SECRET` is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = non_blank(&lookup, "JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let access_token_expiry = match non_blank(&lookup, "JWT_ACCESS_EXPIRY") {
            Some(value) => value
                .parse()
                .ok()
                .filter(|seconds: &i64| *seconds > 0)
                .ok_or(ConfigError::Invalid {
                    name: "JWT_ACCESS_EXPIRY",
                    value,
                })?,
            None => DEFAULT_ACCESS_TOKEN_EXPIRY,
        };

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}
