//! Domus Server — application entry point.
//!
//! Wires logging, configuration, the database connection, migrations,
//! and the request handlers. Transport is host-provided: the host
//! dispatches calls into [`domus_api::Handlers`] one at a time.

mod config;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("domus=info".parse().unwrap()))
        .json()
        .init();

    tracing::info!("Starting Domus server...");

    let db_config = config::db_config_from_env();
    let manager = match domus_db::DbManager::connect(&db_config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = domus_db::run_migrations(manager.client()).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let _handlers = domus_api::Handlers::new(manager.client().clone());

    tracing::info!("Domus repositories ready; awaiting host dispatch");
}
