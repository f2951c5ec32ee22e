use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionResponseData;
use crate::domain::user::models::LogInCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;

    // A username that could never have signed up is just an unknown user.
    let username =
        Username::new(body.username).map_err(|_| ApiError::from(UserError::InvalidCredentials))?;

    state
        .user_service
        .log_in(LogInCommand {
            username,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref signed_in| ApiSuccess::new(StatusCode::OK, signed_in.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}
