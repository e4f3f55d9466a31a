//! Authentication data models and DTOs.
//!
//! # Records
//!
//! - [`CredentialRecord`] - A registered user as persisted, including the
//!   password hash. Never serialized.
//! - [`NewCredential`] - Fields for creating a record
//!
//! # Request DTOs
//!
//! - [`RegisterRequest`] - `POST /api/auth/register`
//! - [`LoginRequest`] - `POST /api/auth/login`
//!
//! # Response DTOs
//!
//! - [`UserSummary`] - `{ id, name, email }`, used for both real users and the
//!   superadmin profile
//! - [`UserListing`] - Projection returned by `GET /api/auth/users`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validator::not_blank;

#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

pub struct NewCredential {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "not_blank", message = "Please provide name, email, and password"),
        length(min = 1, max = 50, message = "Name must be between 1 and 50 characters")
    )]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login credentials.
///
/// The email is deliberately not format-checked: the superadmin comparison
/// trims and lowercases it, so padded input must reach the service.
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    /// Record id, or `"superadmin"`
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&CredentialRecord> for UserSummary {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<CredentialRecord> for UserListing {
    fn from(record: CredentialRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserSummary,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserListing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CredentialRecord {
        CredentialRecord {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_debug_omits_password_hash() {
        let rendered = format!("{:?}", record());
        assert!(!rendered.contains("$2b$04$"));
        assert!(rendered.contains("ada@example.com"));
    }

    #[test]
    fn test_listing_serializes_without_hash() {
        let value = serde_json::to_value(UserListing::from(record())).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("createdAt"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(bad_email.validate().is_err());

        let blank_name = RegisterRequest {
            name: "   ".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_login_request_accepts_padded_email() {
        let request = LoginRequest {
            email: "  SuperAdmin@Example.com ".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
