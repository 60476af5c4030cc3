//! Cookie-carried operator sessions.
//!
//! The whole session lives in the `dashboard_session` cookie; there is no
//! server-side store. Deleting the cookie is the only way to end a session,
//! so a copied cookie stays usable until it expires unless the upstream token
//! is revoked.
//!
//! # Security
//! The cookie value is base64-encoded JSON. It is neither signed nor
//! encrypted: HttpOnly + Secure keep it away from page scripts and plaintext
//! transport, but nothing stops a client from editing its own cookie and
//! raising `user.role`. Authorization decisions that matter must be confirmed
//! upstream until a MAC keyed by a server secret is added (that changes the
//! wire format).

pub mod codec;
pub mod logout;
pub mod model;

use thiserror::Error;

pub use codec::{
    OAUTH_STATE_COOKIE, SESSION_COOKIE, SESSION_MAX_AGE_SECS, clear, decode_session,
    encode_session, read, write,
};
pub use logout::{LogoutMode, LogoutResponse, logout, logout_redirect, perform_logout};
pub use model::{AuthMethod, Role, Session, SessionUser};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session cookie is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("session cookie is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("session payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("unknown auth method: {0}")]
    UnknownAuthMethod(String),
}
