//! Role handlers.

use actix_web::{HttpResponse, web};

use warden_core::domain::{Role, RoleDraft, RoleFilter, RolePatch};
use warden_core::pagination::PageRequest;
use warden_shared::ApiResponse;
use warden_shared::dto::{RoleData, RoleListQuery, RolePatchRequest, RoleRequest, RoleResponse};

use super::page_response;
use crate::extract::{ValidatedJson, parse_id};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn role_response(role: Role) -> RoleResponse {
    RoleResponse {
        id: role.id,
        title: role.title,
        desc: role.desc,
    }
}

fn role_data(role: Role) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(RoleData {
        role: role_response(role),
    }))
}

/// GET /api/role?page=&size=&title=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<RoleListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let request = PageRequest::normalize(query.page, query.size);
    let filter = RoleFilter { title: query.title };

    let page = state
        .roles
        .list(request.offset(), request.limit(), &filter)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(request, page, role_response))))
}

/// POST /api/role
pub async fn create(
    state: web::Data<AppState>,
    ValidatedJson(req): ValidatedJson<RoleRequest>,
) -> AppResult<HttpResponse> {
    let role = state
        .roles
        .create(RoleDraft {
            title: req.title,
            desc: req.desc,
        })
        .await?;

    Ok(role_data(role))
}

/// GET /api/role/{id}
pub async fn retrieve(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    Ok(role_data(state.roles.retrieve(id).await?))
}

/// PUT /api/role/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    ValidatedJson(req): ValidatedJson<RoleRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let role = state
        .roles
        .update(
            id,
            RoleDraft {
                title: req.title,
                desc: req.desc,
            },
        )
        .await?;

    Ok(role_data(role))
}

/// PATCH /api/role/{id}
pub async fn partial_update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    ValidatedJson(req): ValidatedJson<RolePatchRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let role = state
        .roles
        .partial_update(
            id,
            RolePatch {
                title: req.title,
                desc: req.desc,
            },
        )
        .await?;

    Ok(role_data(role))
}

/// DELETE /api/role/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.roles.delete(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({}))))
}
