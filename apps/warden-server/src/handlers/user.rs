//! User handlers.

use actix_web::{HttpResponse, web};

use warden_core::DomainError;
use warden_core::domain::{User, UserFilter};
use warden_core::pagination::PageRequest;
use warden_core::service::UserProfile;
use warden_shared::ApiResponse;
use warden_shared::dto::{
    PasswordChangeRequest, PasswordResetRequest, UserCreateRequest, UserData, UserListQuery,
    UserPatchRequest, UserResponse,
};

use super::page_response;
use crate::extract::{ValidatedJson, parse_id};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(super) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        nickname: user.nickname,
        telephone: user.telephone,
        email: user.email,
        roles: user.roles,
        created_at: user.created_at.to_rfc3339(),
    }
}

fn user_data(user: User) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(UserData {
        user: user_response(user),
    }))
}

/// GET /api/user?page=&size=&username=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<UserListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let request = PageRequest::normalize(query.page, query.size);
    let filter = UserFilter {
        username: query.username,
    };

    let page = state
        .users
        .list(request.offset(), request.limit(), &filter)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_response(request, page, user_response))))
}

/// POST /api/user
pub async fn create(
    state: web::Data<AppState>,
    ValidatedJson(req): ValidatedJson<UserCreateRequest>,
) -> AppResult<HttpResponse> {
    let profile = UserProfile {
        nickname: req.nickname,
        telephone: req.telephone,
        email: req.email,
    };

    let user = state
        .users
        .create(req.username, &req.password1, profile, req.roles)
        .await?;

    Ok(user_data(user))
}

/// GET /api/user/{id}
pub async fn retrieve(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    Ok(user_data(state.users.retrieve(id).await?))
}

/// PUT /api/user/{id} - full replacement of a user is not supported; use
/// PATCH for the profile and the password endpoints for credentials.
pub async fn update(path: web::Path<String>) -> AppResult<HttpResponse> {
    parse_id(&path)?;
    Err(DomainError::NotImplemented("user update").into())
}

/// PATCH /api/user/{id}
pub async fn partial_update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    ValidatedJson(req): ValidatedJson<UserPatchRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let profile = UserProfile {
        nickname: req.nickname,
        telephone: req.telephone,
        email: req.email,
    };

    let user = state.users.partial_update(id, profile, req.roles).await?;
    Ok(user_data(user))
}

/// DELETE /api/user/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.users.delete(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({}))))
}

/// PUT /api/user/{id}/password - administrator password reset.
pub async fn reset_password(
    state: web::Data<AppState>,
    path: web::Path<String>,
    ValidatedJson(req): ValidatedJson<PasswordResetRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let user = state.users.reset_password(id, &req.password).await?;
    Ok(user_data(user))
}

/// POST /api/user/password - change the caller's own password.
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    ValidatedJson(req): ValidatedJson<PasswordChangeRequest>,
) -> AppResult<HttpResponse> {
    tracing::debug!(username = %identity.username, "Password change requested");

    let user = state
        .users
        .change_password(identity.user_id, &req.password, &req.password1)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        UserData {
            user: user_response(user),
        },
        "password changed",
    )))
}
