//! Success envelope.
//!
//! Every 2xx response body is rewrapped as
//! `{"data": <body>, "meta": {"timestamp": <ISO-8601>, "success": true}}`.
//! Handlers return bare payloads. Error responses are left as `AppError` rendered them.

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, now_timestamp};

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub data: Value,
    pub meta: Meta,
}

#[derive(Debug, Serialize)]
pub struct Meta {
    pub timestamp: String,
    pub success: bool,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            data,
            meta: Meta {
                timestamp: now_timestamp(),
                success: true,
            },
        }
    }
}

/// Must be the innermost layer applied to the API router so that only handler output is wrapped.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(envelope_middleware))
}

async fn envelope_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if !response.status().is_success() {
        return response;
    }

    match wrap(response).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn wrap(response: Response) -> Result<Response, AppError> {
    let (mut parts, body) = response.into_parts();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(AppError::internal)?;

    let envelope = Envelope::success(payload_value(&bytes));
    let body = serde_json::to_vec(&envelope).map_err(AppError::internal)?;

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok(Response::from_parts(parts, Body::from(body)))
}

// empty -> null; non-JSON bodies are carried as a string
fn payload_value(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use axum::{
        Json,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    async fn call(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn router() -> Router {
        apply(
            Router::new()
                .route("/json", get(|| async { Json(json!({"id": 1})) }))
                .route("/empty", get(|| async { StatusCode::OK }))
                .route("/text", get(|| async { "plain" }))
                .route("/missing", get(|| async { AppError::NotFound { id: "9".into() } })),
        )
    }

    #[tokio::test]
    async fn wraps_json_payloads() {
        let (status, body) = call(router(), "/json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"id": 1}));
        assert_eq!(body["meta"]["success"], true);
        assert!(body["meta"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn wraps_empty_and_text_bodies() {
        let (_, body) = call(router(), "/empty").await;
        assert_eq!(body["data"], Value::Null);

        let (_, body) = call(router(), "/text").await;
        assert_eq!(body["data"], "plain");
    }

    #[tokio::test]
    async fn leaves_errors_untouched() {
        let (status, body) = call(router(), "/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
        assert!(body.get("data").is_none());
    }
}
