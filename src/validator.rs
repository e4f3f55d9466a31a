use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

use jobboard_core::AppError;

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    // Several blank fields share one message.
    messages.sort();
    messages.dedup();
    messages.join(", ")
}

/// Pulls the field path out of a serde error such as
/// ``type: unknown variant `Gig`, expected one of ...``.
fn field_before(error_msg: &str, marker: &str) -> Option<String> {
    let (head, _) = error_msg.split_once(marker)?;
    let field = head.trim_end().trim_end_matches(':').rsplit(": ").next()?;
    (!field.is_empty() && !field.contains(' ')).then(|| field.to_string())
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("unknown variant") {
        return match field_before(&error_msg, "unknown variant") {
            Some(field) => AppError::bad_request(anyhow!("Invalid value for field {}", field)),
            None => AppError::bad_request(anyhow!("Invalid value in request")),
        };
    }

    if error_msg.contains("invalid type") {
        return match field_before(&error_msg, "invalid type") {
            Some(field) => AppError::bad_request(anyhow!("Invalid type for field {}", field)),
            None => AppError::bad_request(anyhow!("Invalid field type in request")),
        };
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// JSON body extractor that runs `validator` rules after deserializing.
///
/// Every failure, malformed JSON or a broken rule, is a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// Query string extractor answering parse failures with the JSON error
/// envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "rejected query string");
                AppError::bad_request(anyhow!("Invalid query parameters"))
            })?;

        Ok(ValidatedQuery(value))
    }
}

/// `deserialize_with` helper that strips surrounding whitespace, so length
/// rules see the value that will be stored.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Optional counterpart of [`trimmed`]. Pair with `#[serde(default)]`.
pub fn trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| v.map(|s| s.trim().to_string()))
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn requirements_not_blank(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("blank_requirement"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Engineer").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t ").is_err());
    }

    #[test]
    fn test_requirements_not_blank() {
        assert!(requirements_not_blank(&["Rust".to_string()]).is_ok());
        assert!(requirements_not_blank(&[]).is_ok());
        assert!(requirements_not_blank(&["Rust".to_string(), " ".to_string()]).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Padded {
        #[serde(deserialize_with = "trimmed")]
        title: String,
        #[serde(default, deserialize_with = "trimmed_option")]
        location: Option<String>,
    }

    #[test]
    fn test_trimmed_helpers() {
        let padded: Padded =
            serde_json::from_str(r#"{ "title": "  Engineer ", "location": " Berlin\t" }"#).unwrap();
        assert_eq!(padded.title, "Engineer");
        assert_eq!(padded.location.as_deref(), Some("Berlin"));

        let absent: Padded = serde_json::from_str(r#"{ "title": "Engineer" }"#).unwrap();
        assert_eq!(absent.location, None);

        let missing = serde_json::from_str::<Padded>(r#"{ "location": "Berlin" }"#);
        assert!(missing.unwrap_err().to_string().contains("missing field `title`"));
    }

    #[test]
    fn test_field_before() {
        let msg = "Failed to deserialize the JSON body into the target type: type: unknown variant `Gig`, expected one of `Full-time`";
        assert_eq!(field_before(msg, "unknown variant"), Some("type".to_string()));

        let msg = "Failed to deserialize the JSON body into the target type: requirements: invalid type: string \"x\", expected a sequence";
        assert_eq!(field_before(msg, "invalid type"), Some("requirements".to_string()));

        assert_eq!(field_before("unknown variant `Gig`", "unknown variant"), None);
    }
}
