/*
 * Responsibility
 * - GET /health (liveness)
 * - No authentication; still goes through the response envelope
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
