mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use common::{oauth_session, session_cookie, set_cookies, test_app, MockRevoker};
use runner_dashboard::session::{Role, OAUTH_STATE_COOKIE, SESSION_COOKIE};
use std::sync::Arc;
use tower::util::ServiceExt;

fn logout_request(cookie: Option<String>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn removes(cookies: &[String], name: &str) -> bool {
    cookies.iter().any(|cookie| {
        cookie.starts_with(&format!("{}=;", name))
            && cookie.contains("Max-Age=0")
            && cookie.contains("Path=/")
    })
}

#[tokio::test]
async fn full_logout_redirects_to_configured_gitlab() {
    let revoker = Arc::new(MockRevoker::default());
    let app = test_app(revoker.clone(), Some("https://gitlab.example.com"));

    let response = app
        .oneshot(logout_request(
            Some(session_cookie(&oauth_session(Role::Operator))),
            r#"{"mode":"full"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(removes(&cookies, SESSION_COOKIE), "cookies: {cookies:?}");
    assert_eq!(revoker.calls(), 1);

    let body = json_body(response).await;
    assert_eq!(
        body["redirect"],
        "https://gitlab.example.com/users/sign_out"
    );
}

#[tokio::test]
async fn full_logout_without_configured_url_uses_gitlab_com() {
    let app = test_app(Arc::new(MockRevoker::default()), None);

    let response = app
        .oneshot(logout_request(
            Some(session_cookie(&oauth_session(Role::Viewer))),
            r#"{"mode":"full"}"#,
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["redirect"], "https://gitlab.com/users/sign_out");
}

#[tokio::test]
async fn missing_or_malformed_mode_is_app_only() {
    for body in [r#"{}"#, r#"{"mode":"everything"}"#, "not json", ""] {
        let app = test_app(
            Arc::new(MockRevoker::default()),
            Some("https://gitlab.example.com"),
        );

        let response = app
            .oneshot(logout_request(
                Some(session_cookie(&oauth_session(Role::Admin))),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["redirect"], "/auth/logged-out", "body: {body:?}");
    }
}

#[tokio::test]
async fn failing_revocation_still_clears_cookies() {
    let revoker = Arc::new(MockRevoker::failing());
    let app = test_app(revoker.clone(), None);

    let cookie = format!(
        "{}; {}=handshake",
        session_cookie(&oauth_session(Role::Operator)),
        OAUTH_STATE_COOKIE
    );
    let response = app
        .oneshot(logout_request(Some(cookie), r#"{}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(revoker.calls(), 1);

    let cookies = set_cookies(&response);
    assert!(removes(&cookies, SESSION_COOKIE), "cookies: {cookies:?}");
    assert!(removes(&cookies, OAUTH_STATE_COOKIE), "cookies: {cookies:?}");
}

#[tokio::test]
async fn logout_without_session_succeeds() {
    let revoker = Arc::new(MockRevoker::default());
    let app = test_app(revoker.clone(), None);

    let response = app.oneshot(logout_request(None, "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(revoker.calls(), 0);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn get_logout_redirects_to_logged_out_page() {
    let revoker = Arc::new(MockRevoker::default());
    let app = test_app(revoker.clone(), Some("https://gitlab.example.com"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/logout")
                .header(
                    header::COOKIE,
                    session_cookie(&oauth_session(Role::Operator)),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION].to_str().unwrap(),
        "/auth/logged-out"
    );
    assert!(removes(&set_cookies(&response), SESSION_COOKIE));
    assert_eq!(revoker.calls(), 1);
}
