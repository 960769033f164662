//! Server mode
//!
//! This module contains the HTTP server startup logic.

use actix_web::{App, HttpServer, web};
use anyhow::Result;
use tracing::warn;

use crate::api::middleware::TimingMiddleware;
use crate::api::services::links_routes;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// Builds the store and services once, then serves until actix receives
/// SIGINT/SIGTERM and finishes in-flight requests.
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let link_service = startup.link_service.clone();
    let route_prefix = startup.route_prefix.clone();

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!(
        "Starting server at http://{}{}",
        bind_address,
        if route_prefix.is_empty() { "/" } else { &route_prefix }
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .app_data(web::Data::new(link_service.clone()))
            .service(links_routes(&route_prefix))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    warn!(
        "Server stopped ({} backend closed)",
        startup.store.backend_name()
    );
    Ok(())
}
