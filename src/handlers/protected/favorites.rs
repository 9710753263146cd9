use axum::extract::{Path, State};

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::users::user_not_found;

/// POST /users/:Username/movies/:movieId
///
/// Appends unconditionally: the id is not checked against the Movies
/// collection and duplicates are kept.
pub async fn add(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, String)>,
) -> ApiResult<User> {
    state
        .store
        .add_favorite(&username, &movie_id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| user_not_found(&username))
}

/// DELETE /users/:Username/movies/:movieId - drops every occurrence
pub async fn remove(
    State(state): State<AppState>,
    Path((username, movie_id)): Path<(String, String)>,
) -> ApiResult<User> {
    state
        .store
        .remove_favorite(&username, &movie_id)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| user_not_found(&username))
}
