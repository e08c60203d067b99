//! Request extractors: validated JSON bodies and integer path ids.

use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that rejects unknown fields (serde `deny_unknown_fields`
/// on the DTOs) and runs field-level validation before the handler executes.
/// Both failure modes surface as a 400 with the uniform envelope.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(vec![rejection.body_text()]))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Parse a path parameter into an integer primary key. Non-numeric ids are
/// rejected before any service call runs.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Validation failed (numeric string is expected)".into()))
}
