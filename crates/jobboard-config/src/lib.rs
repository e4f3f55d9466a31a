//! # Jobboard Config
//!
//! Configuration types for the Jobboard API.
//!
//! Every structure is loaded once from environment variables at startup and
//! then shared read-only:
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`auth`]: [`AuthConfig`], bundling the JWT settings, the optional
//!   superadmin identity and the password hashing cost
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listener address, request deadline and store backend
//!
//! # Example
//!
//! ```ignore
//! use jobboard_config::{AuthConfig, CorsConfig, ServerConfig};
//!
//! let auth_config = AuthConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod duration;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use auth::{AuthConfig, SuperadminConfig, normalize_email, parse_password_cost};
pub use cors::CorsConfig;
pub use duration::parse_duration_secs;
pub use jwt::JwtConfig;
pub use server::{ServerConfig, StoreBackend};
