/*
 * Responsibility
 * - /publications CRUD handlers
 * - Authentication and role checks already ran in the access middleware
 * - Update applies the ownership rule of its policy after loading the record
 * - Return bare payloads; the envelope middleware wraps them
 */
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};

use crate::{
    api::{
        dto::publications::{
            AuthorFilter, CreatePublicationRequest, DeletedResponse, ListPublicationsQuery,
            PublicationResponse, UpdatePublicationRequest,
        },
        extractors::{IdentityExtractor, PublicationId, ValidatedJson},
    },
    error::AppError,
    services::auth::Operation,
    state::AppState,
};

pub async fn list_publications(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<PublicationResponse>>, AppError> {
    let Query(pairs) = query.map_err(|e| AppError::bad_request(e.body_text()))?;

    let rows = match ListPublicationsQuery::from(pairs).author_filter() {
        AuthorFilter::All => state.publications()?.list(None),
        AuthorFilter::Equals(author) => state.publications()?.list(Some(&author)),
        AuthorFilter::Nothing => Vec::new(),
    };

    Ok(Json(rows.into_iter().map(PublicationResponse::from).collect()))
}

pub async fn get_publication(
    State(state): State<AppState>,
    PublicationId(id): PublicationId,
) -> Result<Json<PublicationResponse>, AppError> {
    let row = state.publications()?.get(id)?.clone();

    Ok(Json(row.into()))
}

pub async fn create_publication(
    State(state): State<AppState>,
    IdentityExtractor(identity): IdentityExtractor,
    ValidatedJson(req): ValidatedJson<CreatePublicationRequest>,
) -> Result<(StatusCode, Json<PublicationResponse>), AppError> {
    let row = state.publications()?.create(req.into(), &identity.user_id);

    tracing::info!(id = row.id, created_by = %row.created_by, "publication created");

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_publication(
    State(state): State<AppState>,
    PublicationId(id): PublicationId,
    IdentityExtractor(identity): IdentityExtractor,
    ValidatedJson(req): ValidatedJson<UpdatePublicationRequest>,
) -> Result<Json<PublicationResponse>, AppError> {
    let mut store = state.publications()?;

    let owner = &store.get(id)?.created_by;
    Operation::UpdatePublication
        .policy()
        .authorize_resource(&identity, owner)?;

    let row = store.update(id, req.into())?;

    tracing::info!(id, user_id = %identity.user_id, "publication updated");

    Ok(Json(row.into()))
}

pub async fn delete_publication(
    State(state): State<AppState>,
    PublicationId(id): PublicationId,
    IdentityExtractor(identity): IdentityExtractor,
) -> Result<Json<DeletedResponse>, AppError> {
    state.publications()?.remove(id)?;

    tracing::info!(id, user_id = %identity.user_id, "publication deleted");

    Ok(Json(DeletedResponse { deleted: true }))
}
