use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::hash_password;
use crate::database::models::{parse_birthday, NewUser, UserSummary};
use crate::error::ApiError;
use crate::handlers::non_empty;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
}

/// Parse an optional Birthday field; blank counts as absent.
pub(crate) fn birthday_field(raw: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match non_empty(raw) {
        None => Ok(None),
        Some(raw) => parse_birthday(&raw)
            .map(Some)
            .ok_or_else(|| ApiError::validation_error(format!("Birthday '{}' is not a valid date", raw))),
    }
}

/// POST /users - sign up
///
/// Username, Password and Email are required. The existence check is
/// advisory; the store's unique index rejects a concurrent duplicate with the
/// same conflict error.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<UserSummary> {
    let Json(payload) = payload?;

    let (Some(username), Some(password), Some(email)) = (
        non_empty(payload.username),
        non_empty(payload.password),
        non_empty(payload.email),
    ) else {
        return Err(ApiError::validation_error("Username, Password, and Email are required"));
    };
    let birthday = birthday_field(payload.birthday)?;

    if state.store.find_user(&username).await?.is_some() {
        return Err(ApiError::conflict(format!("{} already exists", username)));
    }

    let user = state
        .store
        .create_user(NewUser {
            username,
            password: hash_password(password).await?,
            email,
            birthday,
        })
        .await?;

    tracing::info!("Created user '{}'", user.username);
    Ok(ApiResponse::created(UserSummary::from(&user)))
}
