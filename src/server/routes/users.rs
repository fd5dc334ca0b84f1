//! User and role-management endpoints
//!
//! User records originate with the external identity provider; these
//! endpoints expose them for administration and let admins assign roles.

use crate::auth::rbac::{ADMIN, has_role, is_valid_role};
use crate::server::AppState;
use crate::server::middleware::get_auth_context;
use crate::server::routes::ApiResponse;
use crate::utils::error::BoardError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, info};

/// Configure user routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}/roles", web::put().to(assign_roles)),
    );
}

#[derive(Debug, Deserialize)]
struct AssignRolesRequest {
    roles: Vec<String>,
}

async fn list_users(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    if !has_role(&ctx.roles, ADMIN) {
        return Err(BoardError::forbidden("Only administrators may list users"));
    }

    let users = state.storage.list_users().await?;
    debug!(user_id = %ctx.user_id, count = users.len(), "Listing users");
    Ok(ApiResponse::ok(users))
}

async fn get_user(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let user_id = path.into_inner();

    if !has_role(&ctx.roles, ADMIN) && ctx.user_id != user_id {
        return Err(BoardError::forbidden(
            "You are not allowed to view this user",
        ));
    }

    let user = state
        .storage
        .get_user(&user_id)
        .await?
        .ok_or_else(|| BoardError::not_found("User not found"))?;
    Ok(ApiResponse::ok(user))
}

async fn assign_roles(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<AssignRolesRequest>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    if !has_role(&ctx.roles, ADMIN) {
        return Err(BoardError::forbidden(
            "Only administrators may assign roles",
        ));
    }

    let user_id = path.into_inner();
    let body = body.into_inner();
    for role in &body.roles {
        if !is_valid_role(role) {
            return Err(BoardError::validation(format!("Unknown role: {role}")));
        }
    }

    if state.storage.get_user(&user_id).await?.is_none() {
        return Err(BoardError::not_found("User not found"));
    }

    let updated = state
        .storage
        .update_user(&user_id, serde_json::json!({ "roles": body.roles }))
        .await?;
    info!(user_id = %user_id, admin = %ctx.user_id, "Roles assigned");
    Ok(ApiResponse::ok(updated))
}
