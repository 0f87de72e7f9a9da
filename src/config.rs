//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from
//! the environment.
//!
//! ## Environment Variables
//! - `SERVER_URL`: Base URL of the ceremony endpoints (default:
//!   `http://localhost:8080/webauthn`)
//! - `REQUEST_TIMEOUT_SECS`: Whole-request timeout for each HTTP exchange
//!   (default: 30)

use crate::error::{CeremonyError, CeremonyResult};
use std::env;

/// Client configuration
///
/// All ceremony endpoints (`register:begin`, `login:finish`, ...) are
/// resolved relative to `server_url`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the relying-party ceremony endpoints
    /// Example: "https://example.com/admin/login/webauthn"
    pub server_url: String,

    /// Per-request timeout in seconds
    ///
    /// A timed-out exchange surfaces as a transport error; the ceremony is
    /// not retried.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Loads variables from a `.env` file if one is present, then reads each
    /// value from the environment, falling back to defaults.
    pub fn from_env() -> CeremonyResult<Self> {
        // Load .env file if it exists (dotenvy doesn't error if file missing)
        dotenvy::dotenv().ok();

        Ok(Config {
            server_url: env::var("SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8080/webauthn".to_string()),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| {
                    CeremonyError::Config("REQUEST_TIMEOUT_SECS must be an integer".to_string())
                })?,
        })
    }

    /// Build a configuration for a known server URL with default timeouts
    pub fn new(server_url: impl Into<String>) -> Self {
        Config {
            server_url: server_url.into(),
            request_timeout_secs: 30,
        }
    }
}
