use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::models::{AuthUser, SessionView};
use crate::session::{self, LogoutMode, LogoutResponse};
use crate::AppState;

/// `POST /auth/logout` with an optional `{"mode": "app_only" | "full"}` body.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> (CookieJar, Json<LogoutResponse>) {
    let mode = LogoutMode::from_request_body(&body);

    let (jar, response) = session::logout(
        jar,
        state.revoker.as_ref(),
        mode,
        state.gitlab_url.as_deref(),
    )
    .await;

    tracing::info!(mode = mode.as_str(), redirect = %response.redirect, "User logged out");

    (jar, Json(response))
}

/// Backward-compatible `GET /auth/logout`; always app-only.
pub async fn logout_fallback_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, response) = session::logout(
        jar,
        state.revoker.as_ref(),
        LogoutMode::AppOnly,
        state.gitlab_url.as_deref(),
    )
    .await;

    (
        StatusCode::FOUND,
        jar,
        [(header::LOCATION, response.redirect)],
    )
}

pub async fn logged_out_page() -> impl IntoResponse {
    (
        [
            (
                header::CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, private",
            ),
            (header::PRAGMA, "no-cache"),
        ],
        Html("<!doctype html><title>Signed out</title><p>You have been signed out.</p>"),
    )
}

/// Current principal for page handlers and the UI shell.
pub async fn current_session_handler(auth_user: AuthUser) -> Json<SessionView> {
    Json(SessionView::from(auth_user))
}
