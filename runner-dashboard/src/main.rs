use dotenvy::dotenv;
use runner_dashboard::config::get_configuration;
use runner_dashboard::services::GitLabClient;
use runner_dashboard::startup::build_router;
use runner_dashboard::AppState;
use service_core::observability::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "runner-dashboard",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )?;

    runner_dashboard::services::metrics::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to register metrics: {}", e))?;

    let gitlab_url = configuration.gitlab.url.clone();
    let gitlab_client = Arc::new(GitLabClient::new(configuration.gitlab.clone())?);
    info!(gitlab_url = %gitlab_client.base_url(), "GitLab client configured");

    let app = build_router(AppState::new(gitlab_client, gitlab_url));

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting runner-dashboard on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
