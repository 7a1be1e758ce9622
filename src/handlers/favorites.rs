use axum::extract::{Path, State};
use axum::Extension;
use serde_json::{json, Value};

use crate::api::ApiResponse;
use crate::database::{Favorite, Monument, NewFavorite, User};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Resolve the acting user from the identity's username claim. A token whose
/// username matches no row is an authentication failure, not a 404.
async fn resolve_user(state: &AppState, auth: &AuthUser) -> Result<User, ApiError> {
    state
        .store
        .find_user_by_username(&auth.username)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User not found."))
}

/// POST /api/favorites/:monument_id - add a monument to the user's favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(monument_id): Path<i32>,
) -> Result<ApiResponse<Favorite>, ApiError> {
    let user = resolve_user(&state, &auth).await?;

    let monument = state
        .store
        .find_monument(monument_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("Monument with id {} does not exist.", monument_id))
        })?;

    // Friendly 400 for the common case; under a race the unique index on
    // (user_id, monument_id) still rejects the second insert.
    if state
        .store
        .find_favorite(user.id, monument_id)
        .await?
        .is_some()
    {
        return Err(ApiError::duplicate_favorite(
            "This monument is already in your favorites.",
        ));
    }

    let new_favorite = NewFavorite::new(user.id, monument_id)?;
    let favorite = state.store.insert_favorite(new_favorite).await.map_err(|e| {
        ApiError::persistence(e, "Could not add this monument to your favorites.")
    })?;

    let message = format!("Monument '{}' has been added to your favorites.", monument.title);
    Ok(ApiResponse::created(message, favorite))
}

/// DELETE /api/favorites/:monument_id - remove a monument from the user's
/// favorites. Not idempotent: a second removal reports 404.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(monument_id): Path<i32>,
) -> Result<ApiResponse<Value>, ApiError> {
    let user = resolve_user(&state, &auth).await?;

    let favorite = state
        .store
        .find_favorite(user.id, monument_id)
        .await?
        .ok_or_else(|| ApiError::not_found("This monument is not in your favorites."))?;

    state.store.delete_favorite(favorite.id).await.map_err(|e| {
        ApiError::persistence(e, "Could not remove this monument from your favorites.")
    })?;

    let message = format!(
        "Monument with id {} has been removed from your favorites.",
        monument_id
    );
    Ok(ApiResponse::success(
        message,
        json!({ "userId": user.id, "monumentId": monument_id }),
    ))
}

/// GET /api/favorites - list the monuments the user has favorited
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<ApiResponse<Vec<Monument>>, ApiError> {
    let user = resolve_user(&state, &auth).await?;

    let monuments = state
        .store
        .list_favorite_monuments(user.id)
        .await
        .map_err(|e| ApiError::persistence(e, "Could not retrieve the favorites list."))?;

    Ok(ApiResponse::success(
        "Favorite monuments retrieved successfully.",
        monuments,
    ))
}
