//! Job endpoints

use crate::auth::rbac::{
    ADMIN, LAB_ASSISTANT, PROFESSOR, STUDENT, can_apply_to_job, can_create_job, can_manage_job,
    can_view_job, has_any_role, has_role,
};
use crate::core::models::{Application, Job};
use crate::server::AppState;
use crate::server::middleware::get_auth_context;
use crate::server::routes::ApiResponse;
use crate::utils::error::BoardError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, info};

/// Configure job routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/jobs")
            .route("", web::get().to(list_jobs))
            .route("", web::post().to(create_job))
            .route("/{id}", web::get().to(get_job))
            .route("/{id}", web::put().to(update_job))
            .route("/{id}", web::delete().to(delete_job))
            .route("/{id}/applications", web::post().to(apply_to_job)),
    );
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateJobRequest {
    lab_id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Attach each job's lab snapshot so the guards have the data they need
async fn resolve_labs(state: &AppState, jobs: &mut [Job]) -> Result<(), BoardError> {
    for job in jobs.iter_mut() {
        if job.lab.is_none() {
            if let Some(lab_id) = &job.lab_id {
                job.lab = state.storage.get_lab(lab_id).await?;
            }
        }
    }
    Ok(())
}

async fn list_jobs(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let mut jobs = state.storage.list_jobs().await?;
    resolve_labs(&state, &mut jobs).await?;

    // Students browse the open listings; staff see what the view guard
    // grants them.
    let student_only = has_role(&ctx.roles, STUDENT)
        && !has_any_role(&ctx.roles, &[ADMIN, PROFESSOR, LAB_ASSISTANT]);
    jobs.retain(|job| {
        if student_only {
            job.is_open()
        } else {
            can_view_job(&ctx.user_id, &ctx.roles, job)
        }
    });

    debug!(user_id = %ctx.user_id, count = jobs.len(), "Listing jobs");
    Ok(ApiResponse::ok(jobs))
}

async fn create_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateJobRequest>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let body = body.into_inner();

    // The guard tolerates a missing lab for compatibility; this handler
    // always resolves it so the ownership check actually runs.
    let lab = state
        .storage
        .get_lab(&body.lab_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Lab not found"))?;

    if !can_create_job(&ctx.user_id, &ctx.roles, &body.lab_id, Some(&lab)) {
        return Err(BoardError::forbidden(
            "You are not allowed to create jobs for this lab",
        ));
    }

    let mut job = Job::new(uuid::Uuid::new_v4().to_string());
    job.lab_id = Some(body.lab_id);
    job.title = Some(body.title);
    job.description = body.description;
    job.created_by = Some(ctx.user_id.clone());
    if has_role(&ctx.roles, PROFESSOR) {
        job.professor_id = Some(ctx.user_id.clone());
    }
    job.status = body.status.unwrap_or_else(|| "OPEN".to_string());
    job.created_at = Some(chrono::Utc::now());

    state.storage.put_job(&job).await?;
    info!(job_id = %job.id, user_id = %ctx.user_id, "Job created");
    Ok(ApiResponse::created(job))
}

async fn get_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let job_id = path.into_inner();
    let job = state
        .storage
        .get_job_with_lab(&job_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Job not found"))?;

    if !can_view_job(&ctx.user_id, &ctx.roles, &job) {
        return Err(BoardError::forbidden("You are not allowed to view this job"));
    }
    Ok(ApiResponse::ok(job))
}

async fn update_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let job_id = path.into_inner();
    let job = state
        .storage
        .get_job_with_lab(&job_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Job not found"))?;

    if !can_manage_job(&ctx.user_id, &ctx.roles, &job, job.lab.as_ref()) {
        return Err(BoardError::forbidden(
            "You are not allowed to modify this job",
        ));
    }

    let mut patch = body.into_inner();
    let Some(fields) = patch.as_object_mut() else {
        return Err(BoardError::bad_request("Update body must be an object"));
    };
    // Identity and provenance fields are not updatable
    fields.remove("id");
    fields.remove("createdBy");
    fields.remove("lab");

    let updated = state.storage.update_job(&job_id, patch).await?;
    info!(job_id = %job_id, user_id = %ctx.user_id, "Job updated");
    Ok(ApiResponse::ok(updated))
}

async fn delete_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let job_id = path.into_inner();
    let job = state
        .storage
        .get_job_with_lab(&job_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Job not found"))?;

    if !can_manage_job(&ctx.user_id, &ctx.roles, &job, job.lab.as_ref()) {
        return Err(BoardError::forbidden(
            "You are not allowed to delete this job",
        ));
    }

    state.storage.delete_job(&job_id).await?;
    info!(job_id = %job_id, user_id = %ctx.user_id, "Job deleted");
    Ok(ApiResponse::ok(serde_json::json!({ "id": job_id })))
}

async fn apply_to_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, BoardError> {
    let ctx = get_auth_context(&req)?;
    let job_id = path.into_inner();
    let job = state
        .storage
        .get_job(&job_id)
        .await?
        .ok_or_else(|| BoardError::not_found("Job not found"))?;

    if !can_apply_to_job(&ctx.user_id, &ctx.roles, &job) {
        return Err(BoardError::forbidden(
            "Only students may apply to open jobs",
        ));
    }

    // Duplicate prevention is a handler-side scan, not a guard concern
    if state
        .storage
        .find_application(&job_id, &ctx.user_id)
        .await?
        .is_some()
    {
        return Err(BoardError::conflict("You have already applied to this job"));
    }

    let application = Application::new(uuid::Uuid::new_v4().to_string(), job_id, ctx.user_id);
    state.storage.put_application(&application).await?;
    info!(application_id = %application.id, job_id = %application.job_id, "Application submitted");
    Ok(ApiResponse::created(application))
}
