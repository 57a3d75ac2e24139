//! Integration tests for the Retail storefront.
//!
//! Each test starts its own stub backend API and a real storefront router on
//! ephemeral localhost ports, then drives the storefront over HTTP with
//! `reqwest` (cookie jar enabled, redirects not followed).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p retail-integration-tests
//! ```
//!
//! # Stub Backend
//!
//! - `POST /api/auth/login` accepts only `user@example.com` / `test1234` and
//!   answers `{"access_token": "abc123"}`; anything else gets
//!   401 `{"error": "invalid credentials"}`
//! - `GET /api/products` answers a one-product catalog (`Shirt`, 19.99)
//! - `GET /api/health` answers 200
//!
//! Calls to the stub are counted in [`BackendCalls`].

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use reqwest::Client;
use reqwest::redirect::Policy;
use retail_storefront::config::StorefrontConfig;
use retail_storefront::routes;
use retail_storefront::state::AppState;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const SAMPLE_EMAIL: &str = "user@example.com";
pub const SAMPLE_PASSWORD: &str = "test1234";
pub const SAMPLE_TOKEN: &str = "abc123";

/// Request counters for the stub backend.
#[derive(Debug, Default)]
pub struct BackendCalls {
    pub login: AtomicUsize,
    pub products: AtomicUsize,
}

impl BackendCalls {
    #[must_use]
    pub fn login(&self) -> usize {
        self.login.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn products(&self) -> usize {
        self.products.load(Ordering::SeqCst)
    }
}

/// A running storefront wired to a running stub backend.
pub struct TestContext {
    /// Client with a cookie jar that does not follow redirects.
    pub client: Client,
    pub storefront_url: String,
    pub calls: Arc<BackendCalls>,
}

impl TestContext {
    /// Start a stub backend and a storefront with default configuration.
    pub async fn new() -> Self {
        Self::with_vars(&[]).await
    }

    /// Start a stub backend and a storefront with extra environment
    /// variables (e.g. `JWT_COOKIE_NAME`).
    pub async fn with_vars(vars: &[(&str, &str)]) -> Self {
        let calls = Arc::new(BackendCalls::default());
        let backend_addr = serve(stub_backend(Arc::clone(&calls))).await;

        let mut env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        env.insert(
            "STOREFRONT_API_URL".to_string(),
            format!("http://{backend_addr}/api"),
        );

        let config = StorefrontConfig::from_lookup(|key| env.get(key).cloned())
            .expect("Invalid test configuration");
        let state = AppState::new(config).expect("Failed to build app state");
        let storefront_addr = serve(routes::app(state)).await;

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            storefront_url: format!("http://{storefront_addr}"),
            calls,
        }
    }

    /// Absolute storefront URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    /// Log in through the JSON auth proxy with the given credentials.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/auth/login"))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Login request failed")
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    addr
}

fn stub_backend(calls: Arc<BackendCalls>) -> Router {
    Router::new()
        .route("/api/auth/login", post(stub_login))
        .route("/api/products", get(stub_products))
        .route("/api/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .with_state(calls)
}

async fn stub_login(
    State(calls): State<Arc<BackendCalls>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    calls.login.fetch_add(1, Ordering::SeqCst);

    if body == json!({"email": SAMPLE_EMAIL, "password": SAMPLE_PASSWORD}) {
        (
            StatusCode::OK,
            Json(json!({"access_token": SAMPLE_TOKEN, "token_type": "bearer"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid credentials"})),
        )
    }
}

async fn stub_products(State(calls): State<Arc<BackendCalls>>) -> Json<Value> {
    calls.products.fetch_add(1, Ordering::SeqCst);

    Json(json!({
        "items": [{"id": 1, "name": "Shirt", "price": 19.99, "images": ["/a.jpg"]}],
        "total": 1
    }))
}
