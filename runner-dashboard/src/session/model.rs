use serde::{Deserialize, Serialize};

use super::SessionError;

/// Trust path that established a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Oauth,
    Webauthn,
    Tailscale,
    Mtls,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Oauth => "oauth",
            AuthMethod::Webauthn => "webauthn",
            AuthMethod::Tailscale => "tailscale",
            AuthMethod::Mtls => "mtls",
        }
    }
}

impl std::str::FromStr for AuthMethod {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oauth" => Ok(AuthMethod::Oauth),
            "webauthn" => Ok(AuthMethod::Webauthn),
            "tailscale" => Ok(AuthMethod::Tailscale),
            "mtls" => Ok(AuthMethod::Mtls),
            other => Err(SessionError::UnknownAuthMethod(other.to_string())),
        }
    }
}

/// Authorization level, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Operator,
    Admin,
}

impl Role {
    pub fn allows(&self, required: Role) -> bool {
        *self >= required
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Authenticated principal carried in the `dashboard_session` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Upstream token expiry in epoch seconds. Advisory; never enforced here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub auth_method: AuthMethod,
    pub user: SessionUser,
}

impl Session {
    pub fn new(auth_method: AuthMethod, user: SessionUser) -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            auth_method,
            user,
        }
    }

    pub fn with_tokens(
        mut self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<i64>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.refresh_token = refresh_token;
        self.expires_at = expires_at;
        self
    }
}

/// Permissive shape of a stored session, tolerant of older payloads.
///
/// New optional fields belong here first, then get defaulted in
/// [`StoredSession::into_session`].
#[derive(Debug, Deserialize)]
pub(crate) struct StoredSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    auth_method: Option<String>,
    user: SessionUser,
}

impl StoredSession {
    pub(crate) fn into_session(self) -> Result<Session, SessionError> {
        // Payloads written before auth_method existed were all OAuth.
        let auth_method = match self.auth_method.as_deref() {
            None | Some("") => AuthMethod::Oauth,
            Some(raw) => raw.parse()?,
        };

        Ok(Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at,
            auth_method,
            user: self.user,
        })
    }
}
