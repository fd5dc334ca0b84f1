//! Lab endpoints

use crate::auth::rbac::{
    Action, LAB_ASSISTANT, PROFESSOR, Resource, STUDENT, can_add_user_to_lab, can_modify_lab,
    can_remove_user_from_lab, can_view_lab, has_permission,
};
use crate::core::models::Lab;
use crate::server::AppState;
use crate::server::middleware::get_auth_context;
use crate::server::routes::ApiResponse;
use crate::storage::{FIELD_LAB_ASSISTANT_IDS, FIELD_PROFESSOR_IDS};
use crate::utils::error::BoardError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, info};

/// Configure lab routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/labs")
            .route("", web::get().to(list_labs))
            .route("", web::post().to(create_lab))
            .route("/{id}", web::get().to(get_lab))
            .route("/{id}", web::put().to(update_lab))
            .route("/{id}", web::delete().to(delete_lab))
            .route("/{id}/members", web::post().to(add_member))
            .route("/{id}/members/{user_id}", web::delete().to(remove_member)),
    );
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateLabRequest {
    name: String,
    #[serde(default)]
    description: Option<String>,
    /// Primary owner; defaults to the caller (admins may assign someone else)
    #[serde(default)]
    professor_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddMemberRequest {
    user_id: String,
    role: String,
}

#[derive(Debug, Deserialize)]
struct RemoveMemberQuery {
    #[serde(default)]
    role: Option<String>,
}

async fn list_labs(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let mut labs = state.storage.list_labs().await?;
    labs.retain(|lab| can_view_lab(&ctx.user_id, &ctx.roles, lab));
    debug!(user_id = %ctx.user_id, count = labs.len(), "Listing labs");
    Ok(ApiResponse::ok(labs))
}

async fn create_lab(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateLabRequest>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    if !has_permission(&ctx.roles, Resource::Lab, Action::Create) {
        return Err(BoardError::forbidden("You are not allowed to create labs"));
    }

    let body = body.into_inner();
    let owner = body.professor_id.unwrap_or_else(|| ctx.user_id.clone());

    let mut lab = Lab::new(uuid::Uuid::new_v4().to_string());
    lab.name = Some(body.name);
    lab.description = body.description;
    lab.professor_id = Some(owner.clone());
    lab.professor_ids = Some(vec![owner].into());

    state.storage.put_lab(&lab).await?;
    info!(lab_id = %lab.id, user_id = %ctx.user_id, "Lab created");
    Ok(ApiResponse::created(lab))
}

async fn get_lab(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let lab_id = path.into_inner();
    let lab = state
        .storage
        .get_lab(&lab_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Lab not found"))?;

    if !can_view_lab(&ctx.user_id, &ctx.roles, &lab) {
        return Err(BoardError::forbidden("You are not allowed to view this lab"));
    }
    Ok(ApiResponse::ok(lab))
}

async fn update_lab(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let lab_id = path.into_inner();
    let lab = state
        .storage
        .get_lab(&lab_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Lab not found"))?;

    if !can_modify_lab(&ctx.user_id, &ctx.roles, &lab) {
        return Err(BoardError::forbidden(
            "You are not allowed to modify this lab",
        ));
    }

    let mut patch = body.into_inner();
    let Some(fields) = patch.as_object_mut() else {
        return Err(BoardError::bad_request("Update body must be an object"));
    };
    fields.remove("id");

    let updated = state.storage.update_lab(&lab_id, patch).await?;
    info!(lab_id = %lab_id, user_id = %ctx.user_id, "Lab updated");
    Ok(ApiResponse::ok(updated))
}

async fn delete_lab(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let lab_id = path.into_inner();
    let lab = state
        .storage
        .get_lab(&lab_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Lab not found"))?;

    if !can_modify_lab(&ctx.user_id, &ctx.roles, &lab) {
        return Err(BoardError::forbidden(
            "You are not allowed to delete this lab",
        ));
    }

    state.storage.delete_lab(&lab_id).await?;
    info!(lab_id = %lab_id, user_id = %ctx.user_id, "Lab deleted");
    Ok(ApiResponse::ok(serde_json::json!({ "id": lab_id })))
}

/// Lab association field for a member role, if the lab document carries one.
/// Students are only associated through their own `labIds` field.
fn member_field(role: &str) -> Option<&'static str> {
    match role {
        PROFESSOR => Some(FIELD_PROFESSOR_IDS),
        LAB_ASSISTANT => Some(FIELD_LAB_ASSISTANT_IDS),
        _ => None,
    }
}

async fn add_member(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<AddMemberRequest>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let lab_id = path.into_inner();
    let lab = state
        .storage
        .get_lab(&lab_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Lab not found"))?;

    let body = body.into_inner();
    if ![PROFESSOR, LAB_ASSISTANT, STUDENT].contains(&body.role.as_str()) {
        return Err(BoardError::validation(format!(
            "Cannot add a lab member with role: {}",
            body.role
        )));
    }

    if !can_add_user_to_lab(&ctx.user_id, &ctx.roles, &lab, Some(&body.role)) {
        return Err(BoardError::forbidden(
            "You are not allowed to add users to this lab",
        ));
    }

    if state.storage.get_user(&body.user_id).await?.is_none() {
        return Err(BoardError::not_found("User not found"));
    }

    // Element-level updates; concurrent membership changes do not clobber
    // each other the way whole-field replacement would.
    let lab = match member_field(&body.role) {
        Some(field) => {
            state
                .storage
                .add_lab_member(&lab_id, field, &body.user_id)
                .await?
        }
        None => lab,
    };
    state.storage.add_user_lab(&body.user_id, &lab_id).await?;

    info!(lab_id = %lab_id, member = %body.user_id, role = %body.role, "Lab member added");
    Ok(ApiResponse::ok(lab))
}

async fn remove_member(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(String, String)>,
    query: web::Query<RemoveMemberQuery>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let (lab_id, member_id) = path.into_inner();
    let lab = state
        .storage
        .get_lab(&lab_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Lab not found"))?;

    if !can_remove_user_from_lab(&ctx.user_id, &ctx.roles, &lab, query.role.as_deref()) {
        return Err(BoardError::forbidden(
            "You are not allowed to remove users from this lab",
        ));
    }

    let lab = match query.role.as_deref().and_then(member_field) {
        Some(field) => {
            state
                .storage
                .remove_lab_member(&lab_id, field, &member_id)
                .await?
        }
        None => {
            // No role given: clear the member from every association field
            state
                .storage
                .remove_lab_member(&lab_id, FIELD_PROFESSOR_IDS, &member_id)
                .await?;
            state
                .storage
                .remove_lab_member(&lab_id, FIELD_LAB_ASSISTANT_IDS, &member_id)
                .await?
        }
    };
    if state.storage.get_user(&member_id).await?.is_some() {
        state.storage.remove_user_lab(&member_id, &lab_id).await?;
    }

    info!(lab_id = %lab_id, member = %member_id, "Lab member removed");
    Ok(ApiResponse::ok(lab))
}
