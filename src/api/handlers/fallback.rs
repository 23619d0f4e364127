/*
 * Responsibility
 * - Unknown path or method -> 404 error body instead of an empty response
 * - The message names the request target as sent, query string included
 */
use axum::http::{Method, Uri};

use crate::error::AppError;

pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method,
        url: uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string()),
    }
}
