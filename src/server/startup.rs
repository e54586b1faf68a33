use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info, instrument};

use crate::{
    config::constants::{
        DEFAULT_CORS_MAX_AGE_SECS, HTTP_CLIENT_REQUEST_TIMEOUT_SECS, HTTP_KEEPALIVE_SECS,
        HTTP_SHUTDOWN_TIMEOUT_SECS,
    },
    config::settings::Config,
    error::{ApiError, Result},
    handlers,
    server::app_state::AppState,
    storage::{init_storage_or_memory, Storage},
};

/// Route table, shared between the server and the integration tests
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health::health_check))
        .route(
            "/health/ready",
            web::get().to(handlers::health::readiness_check),
        )
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(handlers::auth_handler::register))
                .route("/login", web::post().to(handlers::auth_handler::login))
                .route("/profile", web::get().to(handlers::auth_handler::profile)),
        )
        .service(
            web::scope("/api/tasks")
                .route("", web::post().to(handlers::task_handler::create_task))
                .route("", web::get().to(handlers::task_handler::list_tasks))
                .route("/{id}", web::get().to(handlers::task_handler::get_task))
                .route("/{id}", web::put().to(handlers::task_handler::update_task))
                .route(
                    "/{id}/completed",
                    web::patch().to(handlers::task_handler::mark_task_completed),
                )
                .route(
                    "/{id}",
                    web::delete().to(handlers::task_handler::delete_task),
                ),
        );
}

/// Start the server, initializing storage from configuration
#[instrument(skip(config))]
pub async fn start_server(config: Config) -> Result<()> {
    let storage = init_storage_or_memory(&config.database).await?;
    start_server_with_storage(config, storage).await
}

/// Start the server with an injected storage backend
#[instrument(skip(config, storage))]
pub async fn start_server_with_storage(config: Config, storage: Arc<dyn Storage>) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let workers = config.server.worker_threads;
    let allowed_origin = config.server.cors_allowed_origin.clone();

    let state = web::Data::new(AppState::new(config, storage.clone())?);

    info!("Starting HTTP server on {}", addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allow_any_header()
            .max_age(DEFAULT_CORS_MAX_AGE_SECS);

        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(
                middleware::DefaultHeaders::new().add(("X-Version", env!("CARGO_PKG_VERSION"))),
            )
            .wrap(cors)
            .configure(configure_routes)
    })
    .workers(workers)
    .keep_alive(Duration::from_secs(HTTP_KEEPALIVE_SECS))
    .client_request_timeout(Duration::from_secs(HTTP_CLIENT_REQUEST_TIMEOUT_SECS))
    .shutdown_timeout(HTTP_SHUTDOWN_TIMEOUT_SECS)
    .bind(&addr)
    .map_err(|e| ApiError::Config(format!("Failed to bind HTTP server on {}: {}", addr, e)))?
    .run()
    .await
    .map_err(|e| ApiError::Internal(format!("HTTP server error: {}", e)))?;

    info!("HTTP server stopped");

    if let Err(e) = storage.close().await {
        error!("Error closing storage connections: {}", e);
    }

    Ok(())
}
