//! Test utilities for spinning up a real Postgres instance via testcontainers.

use std::time::Duration;

use testcontainers::{
    core::{ContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::database::{Database, DatabaseConfig};

/// Spin up a Postgres container and return the container handle plus the
/// settings to reach it. Query logging is off; tests attach their own hooks.
///
/// The container is dropped (and stopped) when `ContainerAsync` goes out of
/// scope, so callers must hold it alive for the duration of the test.
pub async fn postgres_container() -> (ContainerAsync<GenericImage>, DatabaseConfig) {
    let image = GenericImage::new("postgres", "16-alpine")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_USER", "quill")
        .with_env_var("POSTGRES_PASSWORD", "quill")
        .with_env_var("POSTGRES_DB", "quill");

    let container: ContainerAsync<GenericImage> = image
        .start()
        .await
        .expect("Failed to start Postgres container");

    let host_port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get Postgres host port");

    let config = DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: host_port,
        user: "quill".to_string(),
        password: "quill".to_string(),
        database: "quill".to_string(),
        timeout: Duration::from_secs(10),
        max_connections: 4,
        enable_query_logging: false,
    };

    (container, config)
}

/// Connect to a freshly started container, retrying while Postgres finishes
/// its init restart, then apply migrations.
pub async fn connect_migrated(config: &DatabaseConfig) -> Database {
    let mut attempts = 0;
    let db = loop {
        match Database::connect(config).await {
            Ok(db) => break db,
            Err(e) if attempts < 20 => {
                attempts += 1;
                tracing::debug!(error = %e, attempts, "Postgres not ready yet");
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
            Err(e) => panic!("Failed to connect to Postgres: {e}"),
        }
    };
    db.migrate().await.expect("Migration failed");
    db
}
