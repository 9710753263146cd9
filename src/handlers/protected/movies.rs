use axum::extract::{Path, State};

use crate::database::models::{Director, Genre, Movie};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /movies - the whole collection
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Movie>> {
    let movies = state.store.find_movies().await?;
    Ok(ApiResponse::success(movies))
}

/// GET /movies/:title - exact, case-sensitive title match
pub async fn get(State(state): State<AppState>, Path(title): Path<String>) -> ApiResult<Movie> {
    state
        .store
        .find_movie_by_title(&title)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found("no such movie"))
}

/// GET /movies/genre/:genreName - the Genre object of the first matching movie
pub async fn genre_get(State(state): State<AppState>, Path(genre_name): Path<String>) -> ApiResult<Genre> {
    state
        .store
        .find_movie_by_genre(&genre_name)
        .await?
        .map(|movie| ApiResponse::success(movie.genre))
        .ok_or_else(|| ApiError::not_found("no such genre"))
}

/// GET /movies/directors/:directorName - the Director object of the first matching movie
pub async fn director_get(
    State(state): State<AppState>,
    Path(director_name): Path<String>,
) -> ApiResult<Director> {
    state
        .store
        .find_movie_by_director(&director_name)
        .await?
        .map(|movie| ApiResponse::success(movie.director))
        .ok_or_else(|| ApiError::not_found("no such director"))
}
