//! Route-layer authorization: intercept, verify, inject claims or
//! short-circuit with the gate's denial.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Middleware body for a protected route group.
///
/// Hands the raw `Authorization` header to the gate; on a grant the
/// verified claims land in the request extensions for the handler, on a
/// denial the request never reaches it.
pub async fn require_permission(
    state: Arc<AppState>,
    permission: &'static str,
    mut req: Request,
    next: Next,
) -> Response {
    let raw_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    match state.gate.authorize(raw_header.as_deref(), permission).await {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(denial) => ApiError::from(denial).into_response(),
    }
}
