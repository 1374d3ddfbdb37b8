use anyhow::Result;
use tracing_subscriber::EnvFilter;

use quill_api::routes;
use quill_common::AppConfig;
use quill_db::{Database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(env = %config.env, mode = ?config.mode, "ENV mode");

    let db = Database::connect(&DatabaseConfig::from(&config)).await?;

    // Close the pool whether serving ended cleanly or not.
    let result = serve(&config, db.clone()).await;
    db.close().await;
    result
}

async fn serve(config: &AppConfig, db: Database) -> Result<()> {
    db.migrate().await?;
    tracing::info!("Migrations complete");

    let app = routes::build_router(db);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "connect to http://localhost:{}/ for GraphQL playground",
        config.app_port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
