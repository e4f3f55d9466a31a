//! Token claims and the subject they identify.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// Reserved subject of the configured superadmin. Never a valid record id.
pub const SUPERADMIN_SUBJECT: &str = "superadmin";

/// The principal a token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Superadmin,
    User(Uuid),
}

impl Subject {
    /// Parses the `sub` claim. Anything other than the sentinel or a UUID is
    /// rejected as an unknown subject.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        if raw == SUPERADMIN_SUBJECT {
            return Ok(Self::Superadmin);
        }

        Uuid::parse_str(raw)
            .map(Self::User)
            .map_err(|_| AuthError::UnknownSubject)
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self, Self::Superadmin)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superadmin => f.write_str(SUPERADMIN_SUBJECT),
            Self::User(id) => write!(f, "{}", id),
        }
    }
}

/// JWT payload.
///
/// - `sub`: Subject (record id or `"superadmin"`)
/// - `iat`: Issued-at (Unix timestamp)
/// - `exp`: Expiration (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn subject(&self) -> Result<Subject, AuthError> {
        Subject::parse(&self.sub)
    }
}
