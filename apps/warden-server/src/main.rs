//! # Warden API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use warden_core::ports::{PasswordService, TokenService};
use warden_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod extract;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::panic::CatchPanic;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Warden API Server on {}:{}",
        config.host,
        config.port
    );

    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let state = web::Data::new(AppState::new(config.database.as_ref(), tokens, passwords).await);

    HttpServer::new(move || {
        App::new()
            // Innermost: a panic becomes a 500 that the outer layers still tag and log
            .wrap(CatchPanic)
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
