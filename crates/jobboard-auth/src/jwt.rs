//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Verification uses
//! zero leeway: a token is rejected as soon as `exp` has passed.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use jobboard_config::JwtConfig;

use crate::claims::{Claims, Subject};
use crate::error::AuthError;

/// Issues a signed token for `subject`, expiring `config.token_expiry`
/// seconds from now.
///
/// # Errors
///
/// Returns [`AuthError::TokenCreation`] if encoding fails.
pub fn issue_token(subject: &Subject, config: &JwtConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + config.token_expiry,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

/// Verifies the signature and expiry of `token` and returns its claims.
///
/// # Errors
///
/// - [`AuthError::ExpiredToken`] if `exp` has passed
/// - [`AuthError::InvalidToken`] for any other failure (bad signature,
///   malformed input, wrong algorithm, missing claims)
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })
}
