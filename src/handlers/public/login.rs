use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, verify_password, Claims};
use crate::database::models::User;
use crate::error::ApiError;
use crate::handlers::non_empty;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

const BAD_CREDENTIALS: &str = "incorrect username or password";

/// POST /login - exchange Username/Password for a bearer token
///
/// ```json
/// { "Username": "neo", "Password": "p1" }
/// ```
///
/// Unknown users and wrong passwords get the same 401 so the response does
/// not reveal which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload?;

    let (Some(username), Some(password)) = (non_empty(payload.username), non_empty(payload.password)) else {
        return Err(ApiError::validation_error("Username and Password are required"));
    };

    let user = match state.store.find_user(&username).await? {
        Some(user) => user,
        None => {
            tracing::info!("Login failed: unknown user '{}'", username);
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        }
    };

    if !verify_password(password, user.password.clone()).await? {
        tracing::info!("Login failed: wrong password for '{}'", username);
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    let token = generate_jwt(&Claims::new(&user.username)).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    tracing::info!("Issued token for '{}'", user.username);
    Ok(ApiResponse::success(LoginResponse { user, token }))
}
