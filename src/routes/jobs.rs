use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        api_dto::ApiResponse,
        job_dto::{CreateJobPayload, JobListQuery, JobListResponse, JobPosting},
    },
    error::{Error, Result},
    middleware::auth::Claims,
    services::normalizer::normalize_payload,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job posting created", body = JobPosting),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not HR")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: std::result::Result<Json<CreateJobPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    payload.validate()?;

    let posted_by = claims
        .user_id()
        .ok_or_else(|| Error::Unauthorized("Token subject is not a user id".into()))?;

    let job = state
        .job_service
        .create(normalize_payload(payload, posted_by))
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(JobPosting::from(job)))))
}

#[utoipa::path(
    get,
    path = "/api/jobs/public",
    responses(
        (status = 200, description = "Active job postings", body = [JobPosting]),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_public_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.job_service.list_active().await?;
    let postings: Vec<JobPosting> = items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(postings)))
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("search" = Option<String>, Query, description = "Full-text search over title, description and skills")
    ),
    responses(
        (status = 200, description = "Paginated job postings", body = JobListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(ApiResponse::ok(JobListResponse::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job posting found", body = JobPosting),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(JobPosting::from(job))))
}
