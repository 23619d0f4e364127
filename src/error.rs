/*
 * Responsibility
 * - App-wide AppError definition
 * - IntoResponse implementation (HTTP status + uniform JSON error body)
 * - Convert repo / auth / extractor failures into a single shape
 */
use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: ErrorMessage,
    pub timestamp: String,
}

/// A single message, or one entry per failed field for validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing or invalid Authorization header")]
    MissingOrMalformedCredential,
    #[error("Invalid token")]
    InvalidCredential,
    #[error("User not found in request")]
    IdentityMissing,
    #[error("Insufficient role")]
    InsufficientRole,
    #[error("You can update only your own publications or as admin")]
    ForbiddenNotOwner,
    #[error("Publication with id {id} not found")]
    NotFound { id: String },
    #[error("Cannot {method} {url}")]
    RouteNotFound { method: Method, url: String },
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    #[error("Payload Too Large")]
    PayloadTooLarge,
    #[error("Request Timeout")]
    RequestTimeout,
    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(cause: impl Into<anyhow::Error>) -> Self {
        Self::Internal(cause.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingOrMalformedCredential | AppError::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            AppError::IdentityMissing
            | AppError::InsufficientRole
            | AppError::ForbiddenNotOwner => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } | AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal causes never leave the process.
    pub fn message(&self) -> ErrorMessage {
        match self {
            AppError::Validation(messages) => ErrorMessage::List(messages.clone()),
            AppError::Internal(_) => ErrorMessage::Text("Internal server error".into()),
            other => ErrorMessage::Text(other.to_string()),
        }
    }
}

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Internal(cause) => {
                tracing::error!(status = status.as_u16(), error = ?cause, "request failed");
            }
            other => {
                tracing::warn!(status = status.as_u16(), error = %other, "request rejected");
            }
        }

        let body = ErrorResponse {
            status_code: status.as_u16(),
            message: self.message(),
            timestamp: now_timestamp(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { id } => AppError::NotFound { id: id.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::MissingOrMalformedCredential, StatusCode::UNAUTHORIZED),
            (AppError::InvalidCredential, StatusCode::UNAUTHORIZED),
            (AppError::IdentityMissing, StatusCode::FORBIDDEN),
            (AppError::InsufficientRole, StatusCode::FORBIDDEN),
            (AppError::ForbiddenNotOwner, StatusCode::FORBIDDEN),
            (AppError::NotFound { id: "3".into() }, StatusCode::NOT_FOUND),
            (AppError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (AppError::bad_request("bad"), StatusCode::BAD_REQUEST),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::RequestTimeout, StatusCode::REQUEST_TIMEOUT),
            (
                AppError::internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err:?}");
        }
    }

    #[tokio::test]
    async fn renders_uniform_error_body() {
        let (status, body) = body_json(AppError::NotFound { id: "7".into() }).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "Publication with id 7 not found");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_their_cause() {
        let (status, body) =
            body_json(AppError::internal(anyhow::anyhow!("db password is hunter2"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn validation_errors_render_a_message_list() {
        let err = AppError::Validation(vec![
            "title must be longer than or equal to 5 characters".into(),
            "author must be an email".into(),
        ]);
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_routes_name_method_and_url() {
        let err = AppError::RouteNotFound {
            method: Method::PATCH,
            url: "/publications?page=2".into(),
        };
        let (_, body) = body_json(err).await;

        assert_eq!(body["message"], "Cannot PATCH /publications?page=2");
    }
}
