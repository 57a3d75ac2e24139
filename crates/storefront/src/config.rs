//! Storefront configuration loaded from environment variables.
//!
//! The configuration is read once at start-up and carried in
//! [`AppState`](crate::state::AppState); nothing else reads the environment.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_API_URL` - Base URL of the external API
//!   (fallback: `NEXT_PUBLIC_API_URL`, default: `http://localhost:5000/api`)
//! - `JWT_COOKIE_NAME` - Session cookie name (default: `retail_token`)
//! - `STOREFRONT_ENV` - `production` enables the `Secure` cookie flag
//!   (fallback: `NODE_ENV`, default: development)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default base URL of the external API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "retail_token";

/// Timeout applied to every request to the external API.
const BACKEND_TIMEOUT_SECONDS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Anything other than `production` (case-insensitive) is development.
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// External API configuration
    pub backend: BackendConfig,
    /// Session cookie configuration
    pub session: SessionCookieConfig,
    /// Deployment environment
    pub environment: Environment,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// External API configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL every API path is appended to (e.g. `http://localhost:5000/api`)
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl BackendConfig {
    /// Build the absolute URL for an API path such as `/products?size=24`.
    ///
    /// The path is appended to the base URL verbatim, so a base of
    /// `http://host/api` keeps its `/api` segment.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    /// Cookie name
    pub name: String,
    /// Whether to set the `Secure` attribute
    pub secure: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or_default(&lookup, "STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default(&lookup, "STOREFRONT_PORT", 3000_u16)?;

        let (api_key, api_url) = get_with_fallback(&lookup, "STOREFRONT_API_URL", "NEXT_PUBLIC_API_URL")
            .unwrap_or(("STOREFRONT_API_URL", DEFAULT_API_URL.to_string()));
        let base_url = parse_api_url(api_key, &api_url)?;

        let cookie_name =
            lookup_non_empty(&lookup, "JWT_COOKIE_NAME").unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        validate_cookie_name(&cookie_name, "JWT_COOKIE_NAME")?;

        let environment = get_with_fallback(&lookup, "STOREFRONT_ENV", "NODE_ENV")
            .map_or_else(Environment::default, |(_, value)| Environment::parse(&value));

        Ok(Self {
            host,
            port,
            backend: BackendConfig {
                base_url,
                timeout: Duration::from_secs(BACKEND_TIMEOUT_SECONDS),
            },
            session: SessionCookieConfig {
                name: cookie_name,
                secure: environment.is_production(),
            },
            environment,
            sentry_dsn: lookup_non_empty(&lookup, "SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or_default(&lookup, "SENTRY_SAMPLE_RATE", 1.0_f32)?,
            sentry_traces_sample_rate: parse_or_default(&lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a variable, treating an empty or blank value as unset.
fn lookup_non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get the first variable that is set and non-empty, returning which key
/// supplied it.
fn get_with_fallback<F>(lookup: &F, primary: &'static str, fallback: &'static str) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    lookup_non_empty(lookup, primary)
        .map(|value| (primary, value))
        .or_else(|| lookup_non_empty(lookup, fallback).map(|value| (fallback, value)))
}

/// Parse a variable, falling back to `default` when it is unset or empty.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup_non_empty(lookup, key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse the API base URL; only http(s) URLs are usable by the client.
fn parse_api_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Validate that a cookie name is a non-empty RFC 6265 token.
fn validate_cookie_name(name: &str, var_name: &str) -> Result<(), ConfigError> {
    const SEPARATORS: &str = "()<>@,;:\\\"/[]?={} \t";

    if name.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "cookie name cannot be empty".to_string(),
        ));
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !c.is_ascii() || c.is_ascii_control() || SEPARATORS.contains(*c))
    {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("cookie name contains invalid character {bad:?}"),
        ));
    }

    Ok(())
}
