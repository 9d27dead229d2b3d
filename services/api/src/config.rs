//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// The bucket the questionnaire artifacts live in, unless overridden.
const DEFAULT_STORAGE_ROOT: &str = "https://kowroo-questionnaire.s3.eu-west-1.amazonaws.com";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Root URL of the object-storage bucket holding `fileList.json` and the
    /// questionnaire documents.
    pub storage_root_url: String,
    /// Endpoint of the transactional-email API.
    pub email_api_url: String,
    /// Endpoint of the push-messaging gateway.
    pub push_gateway_url: String,
    /// Bearer token for the push gateway, when the deployment requires one.
    pub push_gateway_token: Option<String>,
    /// Timeout applied to every outbound HTTP call.
    pub request_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let storage_root_url = std::env::var("STORAGE_ROOT_URL")
            .unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string());

        let email_api_url = std::env::var("EMAIL_API_URL")
            .map_err(|_| ConfigError::MissingVar("EMAIL_API_URL".to_string()))?;

        let push_gateway_url = std::env::var("PUSH_GATEWAY_URL")
            .map_err(|_| ConfigError::MissingVar("PUSH_GATEWAY_URL".to_string()))?;
        let push_gateway_token = std::env::var("PUSH_GATEWAY_TOKEN").ok();

        let timeout_str = std::env::var("REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "REQUEST_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a number of seconds", timeout_str),
            )
        })?;

        Ok(Self {
            bind_address,
            log_level,
            storage_root_url,
            email_api_url,
            push_gateway_url,
            push_gateway_token,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
