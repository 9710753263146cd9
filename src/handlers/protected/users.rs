use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::hash_password;
use crate::database::models::{User, UserChanges, UserSummary};
use crate::error::ApiError;
use crate::handlers::non_empty;
use crate::handlers::public::signup::birthday_field;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedMessage {
    pub message: String,
}

pub(crate) fn user_not_found(username: &str) -> ApiError {
    ApiError::not_found(format!("{} was not found", username))
}

/// GET /users - every user, Password excluded
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.store.find_users().await?;
    Ok(ApiResponse::success(users))
}

/// GET /users/:Username
pub async fn get(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<User> {
    state
        .store
        .find_user(&username)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found("no such user"))
}

/// PUT /users/:Username - partial update
///
/// Only non-empty fields in the body are applied; everything else keeps its
/// stored value. A new Password is hashed before it reaches the store.
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<UserSummary> {
    let Json(payload) = payload?;

    let password = match non_empty(payload.password) {
        Some(password) => Some(hash_password(password).await?),
        None => None,
    };
    let changes = UserChanges {
        username: non_empty(payload.username),
        password,
        email: non_empty(payload.email),
        birthday: birthday_field(payload.birthday)?,
    };

    let user = state
        .store
        .update_user(&username, changes)
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    tracing::info!("User '{}' updated by '{}'", username, caller.username);
    Ok(ApiResponse::success(UserSummary::from(&user)))
}

/// DELETE /users/:Username - no cascade; favorites go with the document
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(username): Path<String>,
) -> ApiResult<DeletedMessage> {
    state
        .store
        .delete_user(&username)
        .await?
        .ok_or_else(|| user_not_found(&username))?;

    tracing::info!("User '{}' deleted by '{}'", username, caller.username);
    Ok(ApiResponse::success(DeletedMessage {
        message: format!("User {} was deleted", username),
    }))
}
