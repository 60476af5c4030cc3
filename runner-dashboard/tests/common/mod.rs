//! Shared helpers for runner-dashboard router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use runner_dashboard::{
    session::{encode_session, AuthMethod, Role, Session, SessionUser, SESSION_COOKIE},
    services::TokenRevoker,
    startup::build_router,
    AppState,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Revoker that counts calls and optionally fails every one of them.
#[derive(Default)]
pub struct MockRevoker {
    calls: AtomicUsize,
    fail: bool,
}

impl MockRevoker {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRevoker for MockRevoker {
    async fn revoke(&self, _access_token: &str) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("revocation endpoint unreachable");
        }
        Ok(())
    }
}

pub fn test_app(revoker: Arc<MockRevoker>, gitlab_url: Option<&str>) -> Router {
    build_router(AppState::new(revoker, gitlab_url.map(str::to_string)))
}

pub fn oauth_session(role: Role) -> Session {
    Session::new(
        AuthMethod::Oauth,
        SessionUser {
            id: 1001,
            username: "runner-ops".to_string(),
            name: "Runner Ops".to_string(),
            email: "runner-ops@example.com".to_string(),
            role,
        },
    )
    .with_tokens("gl-access-token", Some("gl-refresh-token".to_string()), None)
}

pub fn session_cookie(session: &Session) -> String {
    format!(
        "{}={}",
        SESSION_COOKIE,
        encode_session(session).expect("session encodes")
    )
}

/// All `Set-Cookie` values on a response.
pub fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}
