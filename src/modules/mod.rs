pub mod auth;
pub mod job_posts;
