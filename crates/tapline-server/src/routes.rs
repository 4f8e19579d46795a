//! Route definitions for the drinks API.

use crate::{auth, handlers, state::AppState};
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    routing::{delete, get, patch, post},
};
use std::sync::Arc;

/// Assemble the API router. Each protected group carries its own
/// permission gate layer; `GET /drinks` stays public. Unknown routes and
/// unsupported methods fall back to the JSON error envelope.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new().route("/drinks", get(handlers::list_drinks));

    let detail = guard(
        &state,
        "get:drinks-detail",
        Router::new().route("/drinks-detail", get(handlers::drinks_detail)),
    );
    let create = guard(
        &state,
        "post:drinks",
        Router::new().route("/drinks", post(handlers::create_drink)),
    );
    let update = guard(
        &state,
        "patch:drinks",
        Router::new().route("/drinks/{id}", patch(handlers::update_drink)),
    );
    let remove = guard(
        &state,
        "delete:drinks",
        Router::new().route("/drinks/{id}", delete(handlers::delete_drink)),
    );

    public
        .merge(detail)
        .merge(create)
        .merge(update)
        .merge(remove)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
}

fn guard(
    state: &Arc<AppState>,
    permission: &'static str,
    router: Router<Arc<AppState>>,
) -> Router<Arc<AppState>> {
    let state = Arc::clone(state);
    router.route_layer(middleware::from_fn(move |req: Request, next: Next| {
        let state = Arc::clone(&state);
        async move { auth::require_permission(state, permission, req, next).await }
    }))
}
