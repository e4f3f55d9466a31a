use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{
    create_job_post, delete_job_post, get_job_post_by_id, get_job_posts, update_job_post,
};

/// Reads are public; writes go through `require_auth`.
pub fn init_job_posts_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_job_post))
        .route("/{id}", put(update_job_post).delete(delete_job_post))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    let public = Router::new()
        .route("/", get(get_job_posts))
        .route("/{id}", get(get_job_post_by_id));

    protected.merge(public)
}
