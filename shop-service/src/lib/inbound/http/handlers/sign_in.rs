use std::sync::Arc;

use auth::AuthenticationError;
use auth::Authenticator;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequestBody>,
) -> Result<ApiSuccess<SignInResponseData>, ApiError> {
    let SignInRequestBody { username, password } = body;
    let authenticator = Arc::clone(&state.authenticator);

    // A name that fails validation cannot belong to anyone
    let username = match Username::new(username) {
        Ok(username) => username,
        Err(_) => return Err(reject_unknown_user(authenticator, password).await),
    };

    let user = match state.user_service.get_user_by_username(&username).await {
        Ok(user) => user,
        Err(UserError::NotFoundByUsername(_)) => {
            tracing::info!(username = %username, "Sign-in for unknown user");
            return Err(reject_unknown_user(authenticator, password).await);
        }
        Err(e) => return Err(ApiError::from(e)),
    };

    let user_id = user.id;
    let stored_hash = user.password_hash;
    let result = tokio::task::spawn_blocking(move || {
        authenticator.authenticate(&password, &stored_hash, &user_id.to_string())
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Credential check failed: {}", e)))?
    .map_err(|e| match e {
        AuthenticationError::InvalidCredentials => {
            tracing::info!(user_id = %user_id, "Sign-in with wrong password");
            ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
        }
        AuthenticationError::Token(err) => {
            ApiError::InternalServerError(format!("Token generation failed: {}", err))
        }
    })?;

    tracing::info!(user_id = %user_id, "User signed in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SignInResponseData {
            token: result.access_token,
        },
    ))
}

/// Answers an unknown account with the same work and the same body as a wrong password.
async fn reject_unknown_user(authenticator: Arc<Authenticator>, password: String) -> ApiError {
    match tokio::task::spawn_blocking(move || authenticator.reject_unknown_user(&password)).await {
        Ok(_) => ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string()),
        Err(e) => ApiError::InternalServerError(format!("Credential check failed: {}", e)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInResponseData {
    pub token: String,
}
