//! Shared helpers for unit tests: an in-process stub of the backend API.

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use url::Url;

use crate::config::{BackendConfig, StorefrontConfig};
use crate::state::AppState;

/// Serve `router` on an ephemeral localhost port and return the API base URL
/// (`http://127.0.0.1:{port}/api`).
///
/// Routes in `router` must include the `/api` prefix.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Stub backend has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub backend failed");
    });

    format!("http://{addr}/api")
}

pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: Url::parse(base_url).expect("Invalid stub URL"),
        timeout: Duration::from_secs(5),
    }
}

/// Default storefront configuration pointed at `api_url`.
pub fn config_for(api_url: &str) -> StorefrontConfig {
    StorefrontConfig::from_lookup(|key| (key == "STOREFRONT_API_URL").then(|| api_url.to_string()))
        .expect("Invalid test config")
}

pub fn state_for(api_url: &str) -> AppState {
    AppState::new(config_for(api_url)).expect("Failed to build app state")
}
