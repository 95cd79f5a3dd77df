use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use customer_api::config::{AppConfig, LoggingConfig};
use customer_api::domain::customer::CustomerService;
use customer_api::metrics::Metrics;
use customer_api::{api, store};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    tracing::info!(backend = ?config.storage.backend, "Starting customer API");

    // === 1. Storage backend ===
    let dao = store::connect(&config)
        .await
        .context("failed to initialize customer storage")?;

    // === 2. Service and metrics, shared by every worker ===
    let service = web::Data::new(CustomerService::new(dao));
    let metrics = web::Data::new(Metrics::new()?);

    // === 3. HTTP server ===
    let (host, port) = config.bind_address();
    tracing::info!("Listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .app_data(metrics.clone())
            .configure(api::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {}:{}", host, port))?
    .run()
    .await?;

    tracing::info!("Customer API stopped");
    Ok(())
}

/// Structured logging; RUST_LOG wins over the configured filter
fn init_tracing(logging: &LoggingConfig) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .init();
}
