use std::env;
use std::fmt;

use jobboard_core::{DEFAULT_PASSWORD_COST, MAX_PASSWORD_COST, MIN_PASSWORD_COST};

use crate::jwt::JwtConfig;

/// Administrative identity supplied through configuration.
///
/// The superadmin never exists in the credential store; logging in with these
/// credentials yields a token for the reserved superadmin subject.
#[derive(Clone)]
pub struct SuperadminConfig {
    /// Stored trimmed and lowercased.
    pub email: String,
    pub password: String,
}

impl SuperadminConfig {
    pub fn new(email: &str, password: impl Into<String>) -> Self {
        Self {
            email: normalize_email(email),
            password: password.into(),
        }
    }

    /// Reads `SUPERADMIN_EMAIL` and `SUPERADMIN_PASSWORD`. The bypass is
    /// disabled unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let email = env::var("SUPERADMIN_EMAIL").ok()?;
        let password = env::var("SUPERADMIN_PASSWORD").ok()?;

        if email.trim().is_empty() || password.is_empty() {
            return None;
        }

        Some(Self::new(&email, password))
    }

    /// Normalizes `email` before comparing; the password must match exactly.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        normalize_email(email) == self.email && password == self.password
    }
}

impl fmt::Debug for SuperadminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperadminConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub superadmin: Option<SuperadminConfig>,
    /// bcrypt cost factor used when hashing new passwords.
    pub password_cost: u32,
}

/// Parses `BCRYPT_COST`, falling back to the default when the value is
/// missing, malformed or outside bcrypt's accepted range.
pub fn parse_password_cost(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok())
        .filter(|cost| (MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(cost))
        .unwrap_or(DEFAULT_PASSWORD_COST)
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let password_cost = parse_password_cost(env::var("BCRYPT_COST").ok().as_deref());

        let superadmin = SuperadminConfig::from_env();
        if superadmin.is_none() {
            tracing::info!("superadmin login disabled (SUPERADMIN_EMAIL/SUPERADMIN_PASSWORD not set)");
        }

        Self {
            jwt: JwtConfig::from_env(),
            superadmin,
            password_cost,
        }
    }
}
