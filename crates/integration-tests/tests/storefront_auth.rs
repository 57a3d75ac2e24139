//! Integration tests for login, logout, and the route guard.
//!
//! Each test starts its own stub backend and storefront; no external
//! services are needed.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use retail_integration_tests::{SAMPLE_EMAIL, SAMPLE_PASSWORD, SAMPLE_TOKEN, TestContext};
use serde_json::{Value, json};

fn set_cookie(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn location(resp: &reqwest::Response) -> Option<&str> {
    resp.headers().get(LOCATION).and_then(|value| value.to_str().ok())
}

// ============================================================================
// Route Guard
// ============================================================================

#[tokio::test]
async fn test_protected_pages_redirect_anonymous_visitors() {
    let ctx = TestContext::new().await;

    for path in ["/cart", "/admin", "/cart/checkout", "/administrator"] {
        let resp = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("Request failed");

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&resp), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_public_pages_are_never_redirected() {
    let ctx = TestContext::new().await;

    for path in ["/", "/login", "/health", "/products/1"] {
        let resp = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("Request failed");

        assert!(!resp.status().is_redirection(), "{path}: {}", resp.status());
    }
}

// ============================================================================
// Login / Logout Flow
// ============================================================================

#[tokio::test]
async fn test_login_then_visit_protected_pages() {
    let ctx = TestContext::new().await;

    let resp = ctx.login(SAMPLE_EMAIL, SAMPLE_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = set_cookie(&resp).expect("Login should set the session cookie");
    assert!(cookie.starts_with(&format!("retail_token={SAMPLE_TOKEN}")));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Secure"));

    let body: Value = resp.json().await.expect("Login body is not JSON");
    assert_eq!(body, json!({"ok": true}));

    // The jar now carries the cookie
    for path in ["/cart", "/admin"] {
        let resp = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
    }

    // Header shows Logout instead of Login
    let html = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Failed to read catalog");
    assert!(html.contains(r#"action="/logout""#));
}

#[tokio::test]
async fn test_rejected_login_is_passed_through() {
    let ctx = TestContext::new().await;

    let resp = ctx.login(SAMPLE_EMAIL, "wrong-password").await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&resp).is_none());

    let body: Value = resp.json().await.expect("Rejection body is not JSON");
    assert_eq!(body, json!({"error": "invalid credentials"}));
    assert_eq!(ctx.calls.login(), 1);

    // Still locked out
    let resp = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_logout_locks_protected_pages_again() {
    let ctx = TestContext::new().await;
    ctx.login(SAMPLE_EMAIL, SAMPLE_PASSWORD).await;

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/logout"))
        .send()
        .await
        .expect("Logout request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = set_cookie(&resp).expect("Logout should clear the cookie");
    assert!(cookie.contains("Max-Age=0"));

    let body: Value = resp.json().await.expect("Logout body is not JSON");
    assert_eq!(body, json!({"ok": true}));

    let resp = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_logout_without_session_still_succeeds() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/logout"))
        .send()
        .await
        .expect("Logout request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.calls.login(), 0);
}

#[tokio::test]
async fn test_form_login_without_javascript() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/login"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("email=user%40example.com&password=test1234")
        .send()
        .await
        .expect("Form login failed");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));

    let resp = ctx
        .client
        .get(ctx.url("/admin"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_custom_cookie_name() {
    let ctx = TestContext::with_vars(&[("JWT_COOKIE_NAME", "shop_session")]).await;

    let resp = ctx.login(SAMPLE_EMAIL, SAMPLE_PASSWORD).await;
    let cookie = set_cookie(&resp).expect("Login should set the session cookie");
    assert!(cookie.starts_with("shop_session=abc123"));

    let resp = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_production_cookie_is_secure() {
    let ctx = TestContext::with_vars(&[("STOREFRONT_ENV", "production")]).await;

    let resp = ctx.login(SAMPLE_EMAIL, SAMPLE_PASSWORD).await;
    let cookie = set_cookie(&resp).expect("Login should set the session cookie");
    assert!(cookie.contains("Secure"));
}
