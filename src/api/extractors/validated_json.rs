/*
 * Responsibility
 * - Json<T> that also runs the DTO's validate() before the handler sees it
 * - No body and no Content-Type reads as `{}`
 * - Malformed JSON / wrong types / unknown fields -> 400 with the parser's message
 * - Rule violations -> 400 with every violated rule listed
 * - Body over the configured limit -> 413
 */
use axum::{
    Json,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{StatusCode, header},
};
use serde::de::DeserializeOwned;

use crate::api::dto::Validate;
use crate::error::AppError;

const EMPTY_OBJECT: &[u8] = b"{}";

pub struct ValidatedJson<T>(pub T);

fn from_status(status: StatusCode, body_text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::bad_request(body_text)
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let has_content_type = parts.headers.contains_key(header::CONTENT_TYPE);

        let bytes = Bytes::from_request(Request::from_parts(parts.clone(), body), state)
            .await
            .map_err(|rejection| from_status(rejection.status(), rejection.body_text()))?;

        let Json(body) = if bytes.is_empty() && !has_content_type {
            Json::<T>::from_bytes(EMPTY_OBJECT)
        } else {
            Json::<T>::from_request(Request::from_parts(parts, Body::from(bytes)), state).await
        }
        .map_err(|rejection| from_status(rejection.status(), rejection.body_text()))?;

        body.validate().map_err(AppError::Validation)?;
        Ok(Self(body))
    }
}
