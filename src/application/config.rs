/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use crate::error::AppError;
use crate::utils::config::{get_env_flag, get_env_or_default};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Location and transport settings for the portal
pub struct PortalConfig {
    /// Scheme and host of the portal, without a trailing slash
    pub base_url: String,
    /// Timeout in seconds for every portal request
    pub timeout: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Main configuration for the portal client
pub struct Config {
    /// Portal settings
    pub portal: PortalConfig,
    /// Ask the portal for a long lived session cookie
    pub remember_me: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment
    ///
    /// Loads a `.env` file when one is present, then reads:
    /// - `MISIS_BASE_URL` (default `https://lk.misis.ru`)
    /// - `MISIS_TIMEOUT` in seconds (default 30)
    /// - `MISIS_USER_AGENT` (default `misis-id/<version>`)
    /// - `MISIS_REMEMBER_ME` (default false)
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let base_url = get_env_or_default("MISIS_BASE_URL", String::from(DEFAULT_BASE_URL));

        Config {
            portal: PortalConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: get_env_or_default("MISIS_TIMEOUT", DEFAULT_TIMEOUT_SECS),
                user_agent: get_env_or_default("MISIS_USER_AGENT", String::from(USER_AGENT)),
            },
            remember_me: get_env_flag("MISIS_REMEMBER_ME", false),
        }
    }

    /// Creates a configuration with built-in defaults pointing at `base_url`
    ///
    /// The environment is not consulted, which keeps tests and mirrors
    /// independent of the developer's `.env`.
    pub fn with_base_url(base_url: &str) -> Self {
        Config {
            portal: PortalConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: DEFAULT_TIMEOUT_SECS,
                user_agent: String::from(USER_AGENT),
            },
            remember_me: false,
        }
    }

    /// Request timeout as a [`Duration`]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.portal.timeout)
    }

    /// Builds an absolute portal URL from a path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.portal.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Checks that the configuration can drive a client
    ///
    /// # Errors
    /// `AppError::Config` when the base url is not `http(s)://` or the
    /// timeout is zero
    pub fn validate(&self) -> Result<(), AppError> {
        let base = self.portal.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "base url must start with http:// or https://, got '{base}'"
            )));
        }
        if self.portal.timeout == 0 {
            return Err(AppError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
