use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use jobboard_core::PaginationMeta;

use crate::modules::auth::model::{
    AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, UserListing, UserSummary,
    UsersResponse,
};
use crate::modules::job_posts::model::{
    CreateJobPostDto, CreatorSummary, JobPostListResponse, JobPostResponse, JobPostView, JobType,
    UpdateJobPostDto,
};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::list_users,
        crate::modules::job_posts::controller::create_job_post,
        crate::modules::job_posts::controller::get_job_posts,
        crate::modules::job_posts::controller::get_job_post_by_id,
        crate::modules::job_posts::controller::update_job_post,
        crate::modules::job_posts::controller::delete_job_post,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserSummary,
            UserListing,
            CurrentUserResponse,
            UsersResponse,
            JobType,
            CreateJobPostDto,
            UpdateJobPostDto,
            CreatorSummary,
            JobPostView,
            JobPostResponse,
            JobPostListResponse,
            PaginationMeta,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Job Posts", description = "Job post management; writes are restricted to the creator")
    ),
    info(
        title = "Jobboard API",
        version = "0.1.0",
        description = "REST API for user accounts and job postings. Successful responses are wrapped as `{ success, message?, data }`; the schemas below describe `data`.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
