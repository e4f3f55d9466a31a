//! Password hashing using bcrypt.
//!
//! Hashes are salted per call; the cost factor is supplied by the caller
//! (`AuthConfig::password_cost`) so tests can run with [`MIN_PASSWORD_COST`].

use anyhow::anyhow;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Cost bounds accepted by bcrypt.
pub const MIN_PASSWORD_COST: u32 = 4;
pub const MAX_PASSWORD_COST: u32 = 31;
pub const DEFAULT_PASSWORD_COST: u32 = bcrypt::DEFAULT_COST;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash.
///
/// A hash that cannot be parsed is an internal error, not a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}
