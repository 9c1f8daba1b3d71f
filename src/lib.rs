pub mod analytics;
pub mod api;
pub mod config;
pub mod core_state;
pub mod db;
pub mod models;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Startup failures surfaced by [`run`].
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("State error: {0}")]
    Core(#[from] core_state::CoreError),
    #[error("Server error: {0}")]
    Server(#[from] api::ServerError),
    #[error("Signal handler error: {0}")]
    Signal(#[from] std::io::Error),
}

/// Start the admin analytics server and block until Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::PortalConfig::from_env()?;
    let admin_token = match settings.admin_token.clone() {
        Some(token) => token,
        None => {
            let token = api::types::generate_token();
            tracing::warn!(token, "PORTAL_ADMIN_TOKEN unset; generated an admin token for this run");
            token
        }
    };

    let core = Arc::new(core_state::CoreState::open(&settings.db_path)?);
    let server = api::start_api_server_on(core, &admin_token, settings.bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Admin analytics API listening");

    tokio::signal::ctrl_c().await?;
    server.stop().await;
    Ok(())
}
