//! Route handlers for the drinks API.
//!
//! Success responses use the `{"success": true, ...}` envelope; failures
//! go through [`ApiError`].

use crate::error::ApiError;
use crate::models::{self, Ingredient};
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tapline_auth::Claims;

/// `GET /drinks` — public listing, short representations.
pub async fn list_drinks(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let drinks = models::list_drinks(&state.db)
        .await
        .map_err(anyhow::Error::from)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    let drinks = short_representations(&drinks)?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// `GET /drinks-detail` — requires `get:drinks-detail`, long representations.
pub async fn drinks_detail(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(subject = %claims.sub, "listing drink details");

    let drinks = models::list_drinks(&state.db)
        .await
        .map_err(anyhow::Error::from)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    let drinks = long_representations(&drinks)?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// `POST /drinks` — requires `post:drinks`.
pub async fn create_drink(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let title = body
        .get("title")
        .and_then(Value::as_str)
        .ok_or(ApiError::Unprocessable)?;
    let recipe = body.get("recipe").ok_or(ApiError::Unprocessable)?;
    let ingredients = Ingredient::normalize(recipe).map_err(|_| ApiError::Unprocessable)?;
    let recipe_json = serde_json::to_string(&ingredients).map_err(anyhow::Error::from)?;

    // Constraint violations (duplicate title) answer 422.
    let drink = models::insert_drink(&state.db, title, &recipe_json)
        .await
        .map_err(|_| ApiError::Unprocessable)?;

    tracing::info!(subject = %claims.sub, drink = %drink.title, "drink created");

    let drinks = long_representations(std::slice::from_ref(&drink))?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// `PATCH /drinks/{id}` — requires `patch:drinks`; partial update.
pub async fn update_drink(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let existing = models::find_drink(&state.db, id)
        .await
        .map_err(anyhow::Error::from)?;
    if existing.is_none() {
        return Err(ApiError::NotFound);
    }

    let title = body.get("title").and_then(Value::as_str);
    let recipe_json = match body.get("recipe") {
        Some(recipe) => {
            let ingredients =
                Ingredient::normalize(recipe).map_err(|_| ApiError::Unprocessable)?;
            Some(serde_json::to_string(&ingredients).map_err(anyhow::Error::from)?)
        }
        None => None,
    };

    let drink = models::update_drink(&state.db, id, title, recipe_json.as_deref())
        .await
        .map_err(|_| ApiError::Unprocessable)?;

    tracing::info!(subject = %claims.sub, drink = %drink.title, "drink updated");

    let drinks = long_representations(std::slice::from_ref(&drink))?;
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// `DELETE /drinks/{id}` — requires `delete:drinks`.
pub async fn delete_drink(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let existing = models::find_drink(&state.db, id)
        .await
        .map_err(anyhow::Error::from)?;
    if existing.is_none() {
        return Err(ApiError::NotFound);
    }

    models::delete_drink(&state.db, id)
        .await
        .map_err(|_| ApiError::Unprocessable)?;

    tracing::info!(subject = %claims.sub, drink_id = id, "drink deleted");

    Ok(Json(json!({ "success": true, "delete": id })))
}

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for matched paths with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn short_representations(drinks: &[models::Drink]) -> Result<Vec<Value>, ApiError> {
    drinks
        .iter()
        .map(|d| d.short().map_err(|e| ApiError::Internal(e.into())))
        .collect()
}

fn long_representations(drinks: &[models::Drink]) -> Result<Vec<Value>, ApiError> {
    drinks
        .iter()
        .map(|d| d.long().map_err(|e| ApiError::Internal(e.into())))
        .collect()
}
