//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use warden_shared::ApiResponse;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `"up"`, `"down"` or `"in-memory"`.
    pub database: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, database) = match state.database_up().await {
        Some(true) => ("ok", "up"),
        Some(false) => ("degraded", "down"),
        None => ("ok", "in-memory"),
    };

    if database == "down" {
        tracing::warn!("Health check: database unreachable");
    }

    HttpResponse::Ok().json(ApiResponse::ok(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
