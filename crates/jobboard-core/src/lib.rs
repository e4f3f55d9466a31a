//! # Jobboard Core
//!
//! Core types, errors, and utilities for the Jobboard API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-based pagination parameters and metadata
//! - [`password`]: bcrypt password hashing and verification
//! - [`response`]: The `{ success, message, data }` response envelope
//!
//! # Example
//!
//! ```ignore
//! use jobboard_core::{AppError, DEFAULT_PASSWORD_COST, PaginationParams, hash_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Job post not found"));
//! let hash = hash_password("secure_password", DEFAULT_PASSWORD_COST)?;
//! let limit = PaginationParams::default().limit();
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{
    DEFAULT_PASSWORD_COST, MAX_PASSWORD_COST, MIN_PASSWORD_COST, hash_password, verify_password,
};
pub use response::ApiResponse;
