use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::codec::{self, OAUTH_STATE_COOKIE};
use crate::services::{gitlab_client::TokenRevoker, metrics};

pub const LOGGED_OUT_PATH: &str = "/auth/logged-out";
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutMode {
    /// End the dashboard session only.
    #[default]
    AppOnly,
    /// Also send the browser to the identity provider's sign-out page.
    Full,
}

impl LogoutMode {
    /// Only an explicit `{"mode": "full"}` selects [`LogoutMode::Full`];
    /// anything else, including an unparseable body, is app-only.
    pub fn from_request_body(body: &[u8]) -> Self {
        let mode = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("mode").and_then(|m| m.as_str()).map(str::to_owned));

        match mode.as_deref() {
            Some("full") => LogoutMode::Full,
            _ => LogoutMode::AppOnly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogoutMode::AppOnly => "app_only",
            LogoutMode::Full => "full",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponse {
    pub redirect: String,
}

pub fn logout_redirect(mode: LogoutMode, upstream_base: Option<&str>) -> String {
    match mode {
        LogoutMode::AppOnly => LOGGED_OUT_PATH.to_string(),
        LogoutMode::Full => {
            let base = upstream_base
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .unwrap_or(DEFAULT_GITLAB_URL);
            let base = base.strip_suffix('/').unwrap_or(base);
            format!("{}/users/sign_out", base)
        }
    }
}

/// Revokes the upstream token, if any, then clears local session state.
///
/// Clearing happens whether or not revocation succeeds.
pub async fn perform_logout(jar: CookieJar, revoker: &dyn TokenRevoker) -> CookieJar {
    if let Some(session) = codec::read(&jar) {
        if let Some(access_token) = session.access_token.as_deref().filter(|t| !t.is_empty()) {
            match revoker.revoke(access_token).await {
                Ok(()) => {
                    tracing::info!(user_id = session.user.id, "Upstream token revoked");
                    metrics::record_token_revocation("success");
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = session.user.id,
                        error = %e,
                        "Failed to revoke upstream token during logout"
                    );
                    metrics::record_token_revocation("failure");
                }
            }
        }
    }

    let jar = codec::clear(jar);
    codec::remove_cookie(jar, OAUTH_STATE_COOKIE)
}

pub async fn logout(
    jar: CookieJar,
    revoker: &dyn TokenRevoker,
    mode: LogoutMode,
    upstream_base: Option<&str>,
) -> (CookieJar, LogoutResponse) {
    let jar = perform_logout(jar, revoker).await;
    metrics::record_logout(mode.as_str());

    let response = LogoutResponse {
        redirect: logout_redirect(mode, upstream_base),
    };
    (jar, response)
}
