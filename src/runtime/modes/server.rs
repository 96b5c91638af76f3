//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::{AppStartTime, health_routes, rotation_v1_routes};
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Opens the store and builds the rotation service
/// 3. Configures and starts the HTTP server
/// 4. Waits for Ctrl+C or server exit, then closes the store
///
/// **Note**: `init_config` and the logging system must be initialized
/// before calling this function
pub async fn run_server() -> Result<()> {
    let config = crate::config::get_config();
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let storage = startup.storage.clone();
    let catalog = startup.catalog.clone();
    let rotation_service = startup.rotation_service.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(catalog.clone()))
            .app_data(web::Data::new(rotation_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .service(health_routes())
            .service(rotation_v1_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res.context("HTTP server stopped with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown requested");
        }
    }

    lifetime::shutdown::perform_shutdown_tasks(&startup.storage).await;
    Ok(())
}
