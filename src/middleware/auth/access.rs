//! Access guard: authenticate the bearer credential, attach the `Identity` to extensions,
//! then check the route's required roles.
//!
//! Each route declares an `Operation`; its `AccessPolicy` decides what runs here:
//! - `authenticate`: `Authorization: Bearer <base64 JSON>` must be present and decode
//! - `required_roles`: any-of role check against the decoded identity
//!
//! The ownership rule needs the stored record and is applied by the handler.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::Identity;
use crate::error::AppError;
use crate::services::auth::{Operation, policy, token};
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Puts the access guard for `operation` in front of the handlers of `method_router`.
///
/// ```ignore
/// .route("/publications", guard(Operation::CreatePublication, post(create_publication)))
/// ```
pub fn guard(operation: Operation, method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    // route_layer: unmatched methods fall through to the 405 fallback instead of being guarded
    method_router.route_layer(middleware::from_fn_with_state(operation, access_middleware))
}

/// Extracts `Bearer <credential>` and decodes it. Scheme match is exact and case-sensitive;
/// anything after the credential segment is ignored.
pub fn authenticate(headers: &HeaderMap) -> Result<Identity, AppError> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::MissingOrMalformedCredential)?;

    let mut parts = auth.split(' ');
    let scheme = parts.next();
    let credential = parts.next().filter(|c| !c.is_empty());

    let credential = match (scheme, credential) {
        (Some(BEARER_SCHEME), Some(credential)) => credential,
        _ => return Err(AppError::MissingOrMalformedCredential),
    };

    token::decode(credential).map_err(|err| {
        tracing::warn!(error = %err, "bearer credential rejected");
        AppError::from(err)
    })
}

async fn access_middleware(
    State(operation): State<Operation>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let policy = operation.policy();

    if policy.authenticate {
        let identity = authenticate(req.headers())?;
        tracing::debug!(?operation, user_id = %identity.user_id, "authenticated");

        // middleware -> extractor hand-off
        req.extensions_mut().insert(identity);
    }

    policy::authorize(req.extensions().get::<Identity>(), policy.required_roles)?;

    Ok(next.run(req).await)
}
