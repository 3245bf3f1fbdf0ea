//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use sessionhub_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::Json`], but malformed bodies and rule violations surface as
/// `Validation` errors in the standard error body.
///
/// Only JSON objects are accepted. Serde would otherwise read an array
/// positionally into a struct's fields.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {}", e.body_text())))?;

        if !body.is_object() {
            return Err(AppError::validation("Request body must be a JSON object").into());
        }

        let value: T = serde_json::from_value(body)
            .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

        value
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        Ok(ValidatedJson(value))
    }
}
