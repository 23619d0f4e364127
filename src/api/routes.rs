/*
 * Responsibility
 * - URL structure of the API
 * - Every publication route declares its Operation; the access guard enforces its policy
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::handlers::{
    fallback::not_found,
    health::health,
    publications::{
        create_publication, delete_publication, get_publication, list_publications,
        update_publication,
    },
};
use crate::middleware::auth::access::guard;
use crate::services::auth::Operation;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/publications",
            guard(Operation::ListPublications, get(list_publications))
                .merge(guard(Operation::CreatePublication, post(create_publication))),
        )
        .route(
            "/publications/{id}",
            guard(Operation::GetPublication, get(get_publication))
                .merge(guard(Operation::UpdatePublication, put(update_publication)))
                .merge(guard(Operation::DeletePublication, delete(delete_publication))),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}
