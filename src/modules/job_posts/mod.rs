pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_job_posts_router;
