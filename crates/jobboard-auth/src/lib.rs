//! # Jobboard Auth
//!
//! Stateless bearer tokens for the Jobboard API.
//!
//! This crate provides:
//!
//! - [`claims`]: The token payload and the typed [`Subject`] it carries
//! - [`jwt`]: [`issue_token`] and [`verify_token`]
//! - [`error`]: [`AuthError`] and its mapping onto HTTP statuses
//!
//! A token carries a single meaningful claim, the subject: either a
//! credential record id or the reserved superadmin sentinel. Tokens are never
//! stored server-side and cannot be revoked; they simply expire.
//!
//! # Example
//!
//! ```ignore
//! use jobboard_auth::{Subject, issue_token, verify_token};
//! use jobboard_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(&Subject::User(user_id), &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.subject()?, Subject::User(user_id));
//! ```

pub mod claims;
pub mod error;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, SUPERADMIN_SUBJECT, Subject};
pub use error::AuthError;
pub use jwt::{issue_token, verify_token};
