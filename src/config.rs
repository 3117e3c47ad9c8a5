//! Router configuration.
//!
//! Every field has a default matching the shipped client, so an empty JSON
//! object is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigErrorKind, Error};
use crate::route::ResolutionPolicy;
use crate::session::{ROLES_KEY, TOKEN_KEY};

/// Settings for route resolution, redirects, notices and session storage.
///
/// # Examples
///
/// ```
/// use route_guard::{GuardConfig, ResolutionPolicy};
///
/// let config = GuardConfig::from_json(r#"{ "resolution": "merge", "notice_dismiss_ms": 3000 }"#)
///     .unwrap();
///
/// assert_eq!(config.resolution, ResolutionPolicy::Merge);
/// assert_eq!(config.login_path, "/login");
/// assert_eq!(config.notice_dismiss().as_secs(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Policy for paths declared more than once
    pub resolution: ResolutionPolicy,
    /// Where unauthenticated sessions are sent
    pub login_path: String,
    /// Where sessions lacking the required roles are sent
    pub unauthorized_path: String,
    /// Where unmatched paths are sent
    pub fallback_path: String,
    /// How long denial notices stay visible, in milliseconds
    pub notice_dismiss_ms: u64,
    /// Compare literal path segments case-sensitively
    pub case_sensitive: bool,
    /// Storage key of the session token
    pub token_key: String,
    /// Storage key of the JSON role list
    pub roles_key: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionPolicy::FirstMatch,
            login_path: "/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
            fallback_path: "/".to_string(),
            notice_dismiss_ms: 2000,
            case_sensitive: false,
            token_key: TOKEN_KEY.to_string(),
            roles_key: ROLES_KEY.to_string(),
        }
    }
}

impl GuardConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for malformed JSON or unknown fields, and
    /// `Error::Config` if a redirect target is not an absolute path.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let config: GuardConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every redirect target is an absolute path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, path) in [
            ("login_path", &self.login_path),
            ("unauthorized_path", &self.unauthorized_path),
            ("fallback_path", &self.fallback_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::new(
                    ConfigErrorKind::InvalidRedirectPath,
                    path.as_str(),
                    format!("{} must start with '/'", name),
                ));
            }
        }
        Ok(())
    }

    /// The notice auto-dismiss interval.
    pub fn notice_dismiss(&self) -> Duration {
        Duration::from_millis(self.notice_dismiss_ms)
    }
}
