//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::configure_routes;
use crate::config::ServerConfig;
use crate::runtime::lifetime;

/// Build CORS middleware from `server.cors_origins`
///
/// An empty list keeps the browser's same-origin policy.
fn build_cors_middleware(server: &ServerConfig) -> Cors {
    if server.cors_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = if server.cors_origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        server
            .cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors = cors
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = crate::config::get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let storage = startup.storage.clone();
    let link_service = web::Data::from(startup.link_service.clone());
    let profile_service = web::Data::from(startup.profile_service.clone());
    let analytics_service = web::Data::from(startup.analytics_service.clone());

    let server_config = config.server.clone();
    let cpu_count = server_config.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let storage_for_shutdown = storage.clone();

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&server_config);

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(storage.clone()))
            .app_data(link_service.clone())
            .app_data(profile_service.clone())
            .app_data(analytics_service.clone())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
            lifetime::shutdown::close_storage(&startup.storage).await;
        }
        _ = lifetime::shutdown::listen_for_shutdown(storage_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
