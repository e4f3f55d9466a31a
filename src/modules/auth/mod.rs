pub mod controller;
pub mod identity;
pub mod model;
pub mod router;
pub mod service;

pub use identity::{Identity, resolve_identity};
pub use router::init_auth_router;
