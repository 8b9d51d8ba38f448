mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;
use wayfinder::router;

async fn app() -> axum::Router {
    router(common::test_state().await)
}

#[tokio::test]
async fn admin_page_demands_credentials_with_a_challenge() {
    let app = app().await;

    let req = Request::builder()
        .method(Method::GET)
        .uri("/admin")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Basic realm=\"Secure Area\""),
    );
}

#[tokio::test]
async fn admin_page_rejects_wrong_credentials() {
    for auth in [common::BAD_PASSWORD_AUTH, common::BAD_USERNAME_AUTH] {
        let app = app().await;
        let req = Request::builder()
            .method(Method::GET)
            .uri("/admin")
            .header(header::AUTHORIZATION, auth)
            .body(Body::empty())
            .expect("request build should succeed");
        let resp = app.oneshot(req).await.expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {auth}",
        );
    }
}

#[tokio::test]
async fn admin_page_accepts_the_configured_pair() {
    let app = app().await;

    let req = Request::builder()
        .method(Method::GET)
        .uri("/admin")
        .header(header::AUTHORIZATION, common::GOOD_AUTH)
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_check_confirms_valid_credentials() {
    let app = app().await;

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/admin/auth")
        .header(header::AUTHORIZATION, common::GOOD_AUTH)
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn auth_check_rejects_invalid_credentials() {
    let app = app().await;

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/admin/auth")
        .header(header::AUTHORIZATION, common::BAD_PASSWORD_AUTH)
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn mutating_api_rejects_requests_without_credentials() {
    let app = app().await;

    let cases = [
        (
            Method::POST,
            "/api/decision-tree",
            Body::from(r#"{"nodes":[]}"#),
        ),
        (
            Method::POST,
            "/api/decision-tree/nodes",
            Body::from(r#"{"id":"x","question":"?","options":[]}"#),
        ),
        (
            Method::PUT,
            "/api/decision-tree/nodes/orphan",
            Body::from(r#"{"id":"orphan","question":"?","options":[]}"#),
        ),
        (Method::DELETE, "/api/decision-tree/nodes/orphan", Body::empty()),
    ];

    for (method, uri, body) in cases {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .expect("request build should succeed");
        let resp = app
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {uri}",
        );
    }
}

#[tokio::test]
async fn read_api_needs_no_credentials() {
    let app = app().await;

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/decision-tree")
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
}
