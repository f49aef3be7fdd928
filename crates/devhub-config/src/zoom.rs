use std::fmt;

use crate::{env_lookup, non_blank};

/// Meeting SDK credentials. Either half may be missing; signing fails until
/// both are configured.
#[derive(Clone, Default)]
pub struct ZoomConfig {
    pub sdk_key: Option<String>,
    pub sdk_secret: Option<String>,
}

impl ZoomConfig {
    pub fn new(sdk_key: impl Into<String>, sdk_secret: impl Into<String>) -> Self {
        Self {
            sdk_key: Some(sdk_key.into()),
            sdk_secret: Some(sdk_secret.into()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            sdk_key: non_blank(&lookup, "ZOOM_SDK_KEY"),
            sdk_secret: non_blank(&lookup, "ZOOM_SDK_SECRET"),
        }
    }

    /// Both halves of the credential pair, if configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.sdk_key, &self.sdk_secret) {
            (Some(key), Some(secret)) => Some((key.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for ZoomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomConfig")
            .field("sdk_key", &self.sdk_key)
            .field("sdk_secret", &self.sdk_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
