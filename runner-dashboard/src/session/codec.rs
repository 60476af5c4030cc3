use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
        DecodePaddingMode,
    },
    Engine as _,
};
use time::Duration;

use super::{model::StoredSession, Session, SessionError};
use crate::services::metrics;

pub const SESSION_COOKIE: &str = "dashboard_session";
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 8;

// Older cookies may use either alphabet, with or without padding.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode_session(session: &Session) -> Result<String, SessionError> {
    let json = serde_json::to_string(session)?;
    Ok(STANDARD.encode(json))
}

/// Strict decode of a cookie value, including the `auth_method` backfill.
pub fn decode_session(raw: &str) -> Result<Session, SessionError> {
    let bytes = match LENIENT_STANDARD.decode(raw) {
        Ok(bytes) => bytes,
        Err(standard_err) => LENIENT_URL_SAFE
            .decode(raw)
            .map_err(|_| SessionError::Encoding(standard_err))?,
    };
    let json = String::from_utf8(bytes)?;
    let stored: StoredSession = serde_json::from_str(&json)?;
    stored.into_session()
}

/// Reads the session from the request cookies.
///
/// A missing cookie and an unreadable one both yield `None`: a broken cookie
/// means logged out, never an error.
pub fn read(jar: &CookieJar) -> Option<Session> {
    let raw = jar.get(SESSION_COOKIE)?.value();
    if raw.is_empty() {
        return None;
    }

    match decode_session(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unreadable session cookie");
            metrics::record_session_decode_failure();
            None
        }
    }
}

pub fn write(jar: CookieJar, session: &Session) -> Result<CookieJar, SessionError> {
    let value = encode_session(session)?;

    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(SESSION_MAX_AGE_SECS))
        .build();

    tracing::debug!(
        user_id = session.user.id,
        auth_method = session.auth_method.as_str(),
        "Session cookie written"
    );

    Ok(jar.add(cookie))
}

pub fn clear(jar: CookieJar) -> CookieJar {
    remove_cookie(jar, SESSION_COOKIE)
}

/// Removal must repeat the attributes used when setting, or some clients
/// keep the cookie.
pub(crate) fn remove_cookie(jar: CookieJar, name: &'static str) -> CookieJar {
    jar.remove(
        Cookie::build(name)
            .path("/")
            .secure(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}
