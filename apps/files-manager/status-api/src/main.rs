use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use storage::StorageClients;
use tracing::info;

use files_manager_status_api::config::Config;
use files_manager_status_api::shutdown::shutdown_signal;
use files_manager_status_api::{AppState, app};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        mongodb = %config.mongodb.url(),
        redis = %config.redis.url(),
        "Creating store clients"
    );
    let clients = StorageClients::new(&config.mongodb, &config.redis)
        .wrap_err("failed to create store clients")?;

    let router = app(AppState::new(clients));

    let listener = tokio::net::TcpListener::bind(config.server.address())
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.server.address()))?;
    info!("Server starting on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;

    info!("Files manager status API shutdown complete");
    Ok(())
}
