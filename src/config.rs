//! Runtime configuration, read from command-line flags and the environment.

use crate::model::ThemeName;
use clap::Args;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the people API
    #[arg(long, env = "PEOPLE_ADMIN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "PEOPLE_ADMIN_TIMEOUT", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[arg(long, env = "PEOPLE_ADMIN_CONNECT_TIMEOUT", default_value_t = 5)]
    pub connect_timeout_secs: u64,

    /// Rows per listing page
    #[arg(long, env = "PEOPLE_ADMIN_PAGE_SIZE", default_value_t = 5)]
    pub page_size: u32,

    /// Viewport width used to lay out the side menu
    #[arg(long, default_value_t = 1280)]
    pub viewport_width: u32,

    /// Initial theme (light or dark)
    #[arg(long, env = "PEOPLE_ADMIN_THEME", default_value_t = ThemeName::Light)]
    pub theme: ThemeName,

    /// Bearer token sent with every request
    #[arg(long, env = "PEOPLE_ADMIN_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            page_size: 5,
            viewport_width: 1280,
            theme: ThemeName::Light,
            access_token: None,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.api_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Zero("timeout_secs"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Zero("connect_timeout_secs"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Zero("page_size"));
        }
        Ok(())
    }
}
