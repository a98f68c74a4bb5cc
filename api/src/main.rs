use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use rfs_api::{create_app, AppState};
use rfs_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting RFS Government API Server");

    let config = AppConfig::load().context("failed to load configuration")?;
    info!("Environment: {:?}", config.environment);

    let service = rfs_infra::build_verification_service(&config)
        .await
        .context("failed to initialize verification service")?;
    let app_state = web::Data::new(AppState::new(Arc::new(service)));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
