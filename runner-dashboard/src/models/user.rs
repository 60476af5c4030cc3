use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use service_core::error::AppError;

use crate::session::{self, AuthMethod, Role, SessionUser};

/// Authenticated principal decoded from the session cookie.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub user: SessionUser,
    pub auth_method: AuthMethod,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        match session::read(&jar) {
            Some(session) => Ok(AuthUser {
                user: session.user,
                auth_method: session.auth_method,
            }),
            None => Err(AppError::Unauthorized(anyhow::anyhow!("Not signed in"))),
        }
    }
}

/// What the UI shell needs to know about the signed-in operator.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub user: SessionUser,
    pub auth_method: AuthMethod,
    /// Runner actions (pause) need at least the operator role.
    pub can_operate: bool,
}

impl From<AuthUser> for SessionView {
    fn from(auth_user: AuthUser) -> Self {
        Self {
            can_operate: auth_user.user.role.allows(Role::Operator),
            user: auth_user.user,
            auth_method: auth_user.auth_method,
        }
    }
}
