//! Extractors whose rejections render as [`JsonApiError`] instead of axum's plain-text bodies.

use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;
use service::errors::ServiceError;

use crate::errors::JsonApiError;

/// Key for errors that belong to the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// JSON body; type mismatches are reported against the offending field.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(body_rejection)?;
        serde_path_to_error::deserialize(value)
            .map(ApiJson)
            .map_err(|e| {
                let path = e.path().to_string();
                let field = if path == "." { NON_FIELD_ERRORS.to_string() } else { path };
                JsonApiError::from(ServiceError::invalid(&field, e.into_inner().to_string()))
            })
    }
}

fn body_rejection(rej: JsonRejection) -> JsonApiError {
    match rej {
        JsonRejection::MissingJsonContentType(_) => JsonApiError::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported Media Type",
            Some(rej.body_text()),
        ),
        other => JsonApiError::from(ServiceError::invalid(NON_FIELD_ERRORS, other.body_text())),
    }
}

/// Query string counterpart of [`ApiJson`].
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rej: QueryRejection| JsonApiError::from(ServiceError::invalid(NON_FIELD_ERRORS, rej.body_text())))?;
        Ok(ApiQuery(value))
    }
}

/// Optional integer query value: blank means absent, anything unparsable is a field error.
pub fn optional_i64(field: &str, raw: Option<&str>) -> Result<Option<i64>, ServiceError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ServiceError::invalid(field, "A valid integer is required.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_values_are_absent() {
        assert_eq!(optional_i64("student_id", None).unwrap(), None);
        assert_eq!(optional_i64("student_id", Some("  ")).unwrap(), None);
        assert_eq!(optional_i64("student_id", Some(" 42 ")).unwrap(), Some(42));
    }

    #[test]
    fn unparsable_query_value_names_the_field() {
        match optional_i64("student_id", Some("abc")) {
            Err(ServiceError::Validation(fields)) => assert!(fields.get("student_id").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
