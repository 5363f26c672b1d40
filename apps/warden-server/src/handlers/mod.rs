//! HTTP handlers and route configuration.

mod auth;
mod health;
mod role;
mod user;


use actix_web::web;

use warden_core::pagination::{Page, PageRequest};
use warden_shared::dto::PageResponse;

use crate::extract;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(extract::query_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/role")
                    .route("", web::get().to(role::list))
                    .route("", web::post().to(role::create))
                    .route("/{id}", web::get().to(role::retrieve))
                    .route("/{id}", web::put().to(role::update))
                    .route("/{id}", web::patch().to(role::partial_update))
                    .route("/{id}", web::delete().to(role::destroy)),
            )
            .service(
                web::scope("/user")
                    .route("", web::get().to(user::list))
                    .route("", web::post().to(user::create))
                    // Must precede `/{id}` so "password" is not taken for an id
                    .route("/password", web::post().to(user::change_password))
                    .route("/{id}", web::get().to(user::retrieve))
                    .route("/{id}", web::put().to(user::update))
                    .route("/{id}", web::patch().to(user::partial_update))
                    .route("/{id}", web::delete().to(user::destroy))
                    .route("/{id}/password", web::put().to(user::reset_password)),
            ),
    );
}

/// Shape a service page into the list response, echoing the normalized
/// request.
fn page_response<T, R>(request: PageRequest, page: Page<T>, map: impl Fn(T) -> R) -> PageResponse<R> {
    PageResponse {
        page: request.page,
        size: request.size,
        results: page.items.into_iter().map(map).collect(),
        total: page.total,
    }
}
