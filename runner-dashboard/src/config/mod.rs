use secrecy::Secret;
use serde::Deserialize;

use crate::session::logout::DEFAULT_GITLAB_URL;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub gitlab: GitLabSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct GitLabSettings {
    /// Base URL of the GitLab instance (e.g., https://gitlab.example.com).
    /// Falls back to gitlab.com when unset or empty.
    #[serde(default)]
    pub url: Option<String>,
    /// OAuth application id, used for token revocation.
    pub client_id: String,
    pub client_secret: Secret<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl GitLabSettings {
    pub fn base_url(&self) -> &str {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_GITLAB_URL);
        url.strip_suffix('/').unwrap_or(url)
    }
}

fn default_request_timeout_secs() -> u64 {
    5
}

#[derive(Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP/gRPC collector; spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    // Check if we're already in runner-dashboard directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("runner-dashboard") {
        base_path.join("config")
    } else {
        base_path.join("runner-dashboard").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
