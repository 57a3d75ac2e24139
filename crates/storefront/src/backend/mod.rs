//! Client for the external backend API.
//!
//! # Architecture
//!
//! - The backend owns authentication and the product catalog; this storefront
//!   never stores either
//! - One `reqwest` client shared by every request (connection pooling)
//! - No caching: every catalog render is a fresh round trip
//! - No retries: one request per page render or form submission
//!
//! # Endpoints
//!
//! - `POST {API_BASE}/auth/login` - exchange credentials for an access token
//! - `GET  {API_BASE}/products?size=N` - one page of products
//! - `GET  {API_BASE}/health` - liveness of the backend
//!
//! # Example
//!
//! ```rust,ignore
//! use retail_storefront::backend::{BackendClient, CATALOG_PAGE_SIZE};
//!
//! let client = BackendClient::new(&config.backend)?;
//! let page = client.list_products(CATALOG_PAGE_SIZE).await?;
//! ```

mod types;

pub use types::{AccessToken, Credentials, LoginOutcome};

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::CACHE_CONTROL;
use retail_core::ProductList;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use crate::config::BackendConfig;

use types::LoginResponse;

/// Number of products requested for the catalog page.
pub const CATALOG_PAGE_SIZE: u32 = 24;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure, timeout, or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API {path} failed: {}", .status.as_u16())]
    Status { path: String, status: StatusCode },

    /// A successful login response carried no usable `access_token`.
    #[error("API {path} returned no access token")]
    MissingToken { path: String },
}

impl BackendError {
    /// The HTTP status the backend answered with, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) | Self::MissingToken { .. } => None,
        }
    }
}

/// Client for the external backend API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                config: config.clone(),
            }),
        })
    }

    /// Forward credentials to `POST /auth/login`.
    ///
    /// A non-success answer is not an error: it comes back as
    /// [`LoginOutcome::Rejected`] with the API's status and body so callers
    /// can pass it through.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Http` if the API cannot be reached or a success
    /// body is not JSON, and `BackendError::MissingToken` if a success body
    /// has no non-empty `access_token`.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, BackendError> {
        const PATH: &str = "/auth/login";

        let response = self
            .inner
            .client
            .post(self.inner.config.endpoint(PATH))
            .json(&credentials.payload())
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));
            tracing::info!(status = %status, "Backend rejected login");
            return Ok(LoginOutcome::Rejected { status, body });
        }

        let body: LoginResponse = response.json().await?;

        body.access_token
            .filter(|token| !token.is_empty())
            .map(|token| LoginOutcome::Authenticated(AccessToken::new(token)))
            .ok_or_else(|| {
                tracing::error!("Backend login succeeded without an access token");
                BackendError::MissingToken {
                    path: PATH.to_string(),
                }
            })
    }

    /// Fetch one page of products from `GET /products?size={size}`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Status` carrying the request path and status
    /// if the API answers with a non-success status.
    #[instrument(skip(self))]
    pub async fn list_products(&self, size: u32) -> Result<ProductList, BackendError> {
        let list: ProductList = self.get_json(&format!("/products?size={size}")).await?;
        tracing::debug!(count = list.items.len(), total = ?list.total, "Fetched products");
        Ok(list)
    }

    /// Probe `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable or unhealthy.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<(), BackendError> {
        const PATH: &str = "/health";

        let response = self
            .inner
            .client
            .get(self.inner.config.endpoint(PATH))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Status {
                path: PATH.to_string(),
                status,
            })
        }
    }

    /// Issue an uncached GET and decode a JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self
            .inner
            .client
            .get(self.inner.config.endpoint(path))
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(path, status = %status, "Backend returned non-success status");
            return Err(BackendError::Status {
                path: path.to_string(),
                status,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
