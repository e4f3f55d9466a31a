use axum::http::StatusCode;
use jobboard_core::AppError;

/// Authentication failures.
///
/// Every variant except [`AuthError::TokenCreation`] is a client failure and
/// maps to 401; token creation failures are internal.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Not authorized to access this route")]
    MissingToken,
    #[error("Invalid authorization header format")]
    MalformedHeader,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("User not found. Please log in again.")]
    UnknownSubject,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Failed to create token: {0}")]
    TokenCreation(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TokenCreation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::new(err.status(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_failures_are_unauthorized() {
        for err in [
            AuthError::MissingToken,
            AuthError::MalformedHeader,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::UnknownSubject,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(AppError::from(err).status, StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_token_creation_is_internal() {
        let err = AppError::from(AuthError::TokenCreation("bad key".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }
}
