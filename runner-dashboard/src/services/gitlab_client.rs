use crate::config::GitLabSettings;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use std::time::Duration;

/// Upstream token revocation, consumed during logout.
#[async_trait]
pub trait TokenRevoker: Send + Sync {
    async fn revoke(&self, access_token: &str) -> Result<()>;
}

pub struct GitLabClient {
    client: Client,
    settings: GitLabSettings,
}

impl GitLabClient {
    pub fn new(settings: GitLabSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build GitLab HTTP client: {}", e))?;

        Ok(Self { client, settings })
    }

    pub fn base_url(&self) -> &str {
        self.settings.base_url()
    }
}

#[async_trait]
impl TokenRevoker for GitLabClient {
    /// `POST /oauth/revoke` with the application credentials.
    async fn revoke(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/oauth/revoke", self.base_url());

        let response = self
            .client
            .post(&url)
            .form(&[
                ("client_id", self.settings.client_id.as_str()),
                (
                    "client_secret",
                    self.settings.client_secret.expose_secret().as_str(),
                ),
                ("token", access_token),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", url, e);
                anyhow::anyhow!("HTTP request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "GitLab token revocation returned {}",
                status
            ));
        }

        Ok(())
    }
}
