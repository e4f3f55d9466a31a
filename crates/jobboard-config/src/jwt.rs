use std::env;

use crate::duration::parse_duration_secs;

pub const DEFAULT_TOKEN_EXPIRY: i64 = 604_800; // 7 days
const DEV_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, token_expiry: i64) -> Self {
        Self {
            secret: secret.into(),
            token_expiry,
        }
    }

    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set, falling back to an insecure development secret");
            DEV_SECRET.to_string()
        });

        let token_expiry = match env::var("JWT_EXPIRE") {
            Ok(raw) => parse_duration_secs(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "invalid JWT_EXPIRE, using 7d");
                DEFAULT_TOKEN_EXPIRY
            }),
            Err(_) => DEFAULT_TOKEN_EXPIRY,
        };

        Self {
            secret,
            token_expiry,
        }
    }
}
