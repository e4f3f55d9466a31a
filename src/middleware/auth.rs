use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use jobboard_auth::{AuthError, verify_token};
use jobboard_core::AppError;

use crate::modules::auth::identity::{Identity, resolve_identity};
use crate::state::AppState;

/// Extracts the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Authenticates the request and attaches the caller's [`Identity`].
///
/// Verifies the bearer token, then resolves its subject with at most one
/// credential lookup. Any failure short-circuits with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let claims = verify_token(token, &state.auth_config.jwt)?;
    let subject = claims.subject()?;

    let identity =
        resolve_identity(subject, state.credentials.as_ref(), &state.auth_config).await?;

    tracing::debug!(identity = %identity.id(), "request authenticated");

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// The [`Identity`] attached by [`require_auth`].
///
/// Only usable on routes behind that middleware; elsewhere it rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(matches!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Err(AuthError::MalformedHeader)
        ));
        assert!(matches!(
            bearer_token(&headers("bearer abc")),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn test_empty_token() {
        assert!(matches!(
            bearer_token(&headers("Bearer ")),
            Err(AuthError::MissingToken)
        ));
    }

    #[test]
    fn test_non_ascii_header_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MalformedHeader)
        ));
    }
}
