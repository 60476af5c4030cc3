pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;
pub mod startup;

use services::TokenRevoker;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub revoker: Arc<dyn TokenRevoker>,
    /// Configured GitLab base URL; `None` means gitlab.com.
    pub gitlab_url: Option<String>,
}

impl AppState {
    pub fn new(revoker: Arc<dyn TokenRevoker>, gitlab_url: Option<String>) -> Self {
        Self {
            revoker,
            gitlab_url,
        }
    }
}
