//! Application endpoints

use crate::auth::rbac::{
    ADMIN, LAB_ASSISTANT, PROFESSOR, STUDENT, can_manage_job, has_any_role, has_role,
};
use crate::core::models::Application;
use crate::server::AppState;
use crate::server::middleware::get_auth_context;
use crate::server::routes::ApiResponse;
use crate::utils::error::BoardError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, info};

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/applications")
            .route("", web::get().to(list_applications))
            .route("/{id}", web::put().to(review_application))
            .route("/{id}", web::delete().to(withdraw_application)),
    );
}

#[derive(Debug, Deserialize)]
struct ReviewRequest {
    status: String,
}

/// Keep only the applications whose job the caller may manage
async fn retain_manageable(
    state: &AppState,
    user_id: &str,
    roles: &[String],
    applications: Vec<Application>,
) -> Result<Vec<Application>, BoardError> {
    let mut visible = Vec::new();
    for application in applications {
        let Some(job) = state.storage.get_job_with_lab(&application.job_id).await? else {
            continue;
        };
        if can_manage_job(user_id, roles, &job, job.lab.as_ref()) {
            visible.push(application);
        }
    }
    Ok(visible)
}

async fn list_applications(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let applications = state.storage.list_applications().await?;

    let applications = if has_role(&ctx.roles, ADMIN) {
        applications
    } else if has_any_role(&ctx.roles, &[PROFESSOR, LAB_ASSISTANT]) {
        retain_manageable(&state, &ctx.user_id, &ctx.roles, applications).await?
    } else if has_role(&ctx.roles, STUDENT) {
        applications
            .into_iter()
            .filter(|application| application.student_id == ctx.user_id)
            .collect()
    } else {
        return Err(BoardError::forbidden(
            "You are not allowed to list applications",
        ));
    };

    debug!(user_id = %ctx.user_id, count = applications.len(), "Listing applications");
    Ok(ApiResponse::ok(applications))
}

async fn review_application(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let application_id = path.into_inner();
    let application = state
        .storage
        .get_application(&application_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Application not found"))?;

    if body.status.trim().is_empty() {
        return Err(BoardError::validation("Status must not be empty"));
    }

    let job = state
        .storage
        .get_job_with_lab(&application.job_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Job not found"))?;

    if !can_manage_job(&ctx.user_id, &ctx.roles, &job, job.lab.as_ref()) {
        return Err(BoardError::forbidden(
            "You are not allowed to review this application",
        ));
    }

    let updated = state
        .storage
        .update_application(
            &application_id,
            serde_json::json!({ "status": body.status }),
        )
        .await?;
    info!(application_id = %application_id, status = %body.status, "Application reviewed");
    Ok(ApiResponse::ok(updated))
}

async fn withdraw_application(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let application_id = path.into_inner();
    let application = state
        .storage
        .get_application(&application_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Application not found"))?;

    if !has_role(&ctx.roles, ADMIN) && application.student_id != ctx.user_id {
        return Err(BoardError::forbidden(
            "You may only withdraw your own applications",
        ));
    }

    state.storage.delete_application(&application_id).await?;
    info!(application_id = %application_id, user_id = %ctx.user_id, "Application withdrawn");
    Ok(ApiResponse::ok(serde_json::json!({ "id": application_id })))
}
