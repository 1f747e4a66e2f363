use std::sync::Arc;

use anyhow::Context;
use escala_app::app::api::routes;
use escala_app::config::ConfigHandler;
use escala_app::store_handler::BoardStoreHandler;
use escala_core::config::{Settings, StorageBackend, load_config};
use escala_db::db::connection::create_pool;
use escala_db::db::migrations::run_migrations;
use escala_service::store::{BoardStore, MemoryBoardStore, PgBoardStore};
use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Escala shift board");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = build_store(&config).await?;

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(BoardStoreHandler { store })
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    let server = salvo::Server::new(acceptor);
    let handle = server.handle();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received, draining connections");
        handle.stop_graceful(None);
    });

    server.serve(router).await;

    Ok(())
}

/// ## Summary
/// Opens the configured storage backend.
///
/// ## Errors
/// Returns an error if migrations fail or the connection pool cannot be created.
async fn build_store(config: &Settings) -> anyhow::Result<Arc<dyn BoardStore>> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for the postgres storage backend")?;

            run_migrations(url).await?;
            tracing::info!("Database migrations applied.");

            let pool = create_pool(url, u32::from(config.database.max_connections)).await?;
            tracing::info!("Database connection pool created.");

            Ok(Arc::new(PgBoardStore::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; assignments are lost on restart");
            Ok(Arc::new(MemoryBoardStore::new()))
        }
    }
}
