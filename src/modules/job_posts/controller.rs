use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::instrument;

use jobboard_core::{ApiResponse, AppError};

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

use super::model::{
    CreateJobPostDto, JobPostFilterParams, JobPostListResponse, JobPostResponse, UpdateJobPostDto,
};
use super::service::{JobPostService, parse_post_id};

#[utoipa::path(
    post,
    path = "/api/job-posts",
    request_body = CreateJobPostDto,
    responses(
        (status = 201, description = "Job post created successfully", body = JobPostResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Superadmin cannot own job posts", body = ErrorResponse)
    ),
    tag = "Job Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(identity = %identity.id()))]
pub async fn create_job_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateJobPostDto>,
) -> Result<(StatusCode, Json<ApiResponse<JobPostResponse>>), AppError> {
    let job_post = JobPostService::create(
        state.job_posts.as_ref(),
        state.credentials.as_ref(),
        &identity,
        dto,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Job post created successfully",
            JobPostResponse { job_post },
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/job-posts",
    params(JobPostFilterParams),
    responses(
        (status = 200, description = "Filtered, paginated job posts", body = JobPostListResponse),
        (status = 400, description = "Invalid type, sort or pagination value", body = ErrorResponse)
    ),
    tag = "Job Posts"
)]
#[instrument(skip(state))]
pub async fn get_job_posts(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<JobPostFilterParams>,
) -> Result<Json<ApiResponse<JobPostListResponse>>, AppError> {
    let query = params
        .into_query()
        .map_err(|message| AppError::bad_request(anyhow::anyhow!(message)))?;

    let listing =
        JobPostService::list(state.job_posts.as_ref(), state.credentials.as_ref(), query).await?;

    Ok(Json(ApiResponse::ok(listing)))
}

#[utoipa::path(
    get,
    path = "/api/job-posts/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Job post ID")
    ),
    responses(
        (status = 200, description = "Job post details", body = JobPostResponse),
        (status = 404, description = "Job post not found", body = ErrorResponse)
    ),
    tag = "Job Posts"
)]
#[instrument(skip(state))]
pub async fn get_job_post_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<JobPostResponse>>, AppError> {
    let id = parse_post_id(&id)?;
    let job_post =
        JobPostService::get(state.job_posts.as_ref(), state.credentials.as_ref(), id).await?;

    Ok(Json(ApiResponse::ok(JobPostResponse { job_post })))
}

#[utoipa::path(
    put,
    path = "/api/job-posts/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Job post ID")
    ),
    request_body = UpdateJobPostDto,
    responses(
        (status = 200, description = "Job post updated successfully", body = JobPostResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Job post not found", body = ErrorResponse)
    ),
    tag = "Job Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, identity, dto), fields(identity = %identity.id()))]
pub async fn update_job_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateJobPostDto>,
) -> Result<Json<ApiResponse<JobPostResponse>>, AppError> {
    let id = parse_post_id(&id)?;
    let job_post = JobPostService::update(
        state.job_posts.as_ref(),
        state.credentials.as_ref(),
        &identity,
        id,
        dto,
    )
    .await?;

    Ok(Json(ApiResponse::with_message(
        "Job post updated successfully",
        JobPostResponse { job_post },
    )))
}

#[utoipa::path(
    delete,
    path = "/api/job-posts/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Job post ID")
    ),
    responses(
        (status = 200, description = "Job post deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not the creator", body = ErrorResponse),
        (status = 404, description = "Job post not found", body = ErrorResponse)
    ),
    tag = "Job Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, identity), fields(identity = %identity.id()))]
pub async fn delete_job_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id = parse_post_id(&id)?;
    JobPostService::delete(state.job_posts.as_ref(), &identity, id).await?;

    Ok(Json(ApiResponse::with_message(
        "Job post deleted successfully",
        json!({}),
    )))
}
