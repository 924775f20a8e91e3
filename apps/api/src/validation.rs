use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON request body whose rejections are reported as `AppError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// JSON request body that may be omitted. An empty body decodes as `T::default()`;
/// anything else must be valid JSON for `T`.
#[derive(Debug)]
pub struct OptionalJsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
    }
}

/// Search terms must be present and non-blank; returns the trimmed term.
pub fn require_query(q: Option<&str>) -> Result<String, AppError> {
    match q.map(str::trim) {
        Some(term) if !term.is_empty() => Ok(term.to_string()),
        _ => Err(AppError::Validation("Missing query parameter q".to_string())),
    }
}

/// Rejects absent or blank required body fields.
pub fn require_field<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{name} is required"))),
    }
}

/// Assessment scores are percentages.
pub fn validate_score(score: Option<f64>) -> Result<Option<f64>, AppError> {
    match score {
        Some(s) if !s.is_finite() || !(0.0..=100.0).contains(&s) => Err(AppError::Validation(
            format!("score must be between 0 and 100, got {s}"),
        )),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_query() {
        assert_eq!(require_query(Some("  john ")).unwrap(), "john");
        assert!(require_query(Some("   ")).is_err());
        assert!(require_query(None).is_err());
    }

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("workerId", Some("w1")).unwrap(), "w1");
        let err = require_field("workerId", Some("")).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: workerId is required");
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(validate_score(None).unwrap(), None);
        assert_eq!(validate_score(Some(0.0)).unwrap(), Some(0.0));
        assert_eq!(validate_score(Some(100.0)).unwrap(), Some(100.0));
        assert!(validate_score(Some(100.5)).is_err());
        assert!(validate_score(Some(-1.0)).is_err());
        assert!(validate_score(Some(f64::NAN)).is_err());
    }
}
