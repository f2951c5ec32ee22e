use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::RefreshedAccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let Json(body) = body?;

    let refresh_token = body
        .refresh_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing refresh token".to_string()))?;

    state
        .user_service
        .refresh(&refresh_token)
        .await
        .map_err(|e| match e {
            UserError::InvalidToken(reason) => {
                tracing::debug!(error = %reason, "Refresh token rejected");
                ApiError::Unauthorized("Invalid or expired refresh token".to_string())
            }
            other => ApiError::from(other),
        })
        .map(|refreshed| ApiSuccess::new(StatusCode::OK, refreshed.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub user: UserData,
    pub access_token: String,
}

impl From<RefreshedAccess> for RefreshResponseData {
    fn from(refreshed: RefreshedAccess) -> Self {
        Self {
            user: UserData {
                username: refreshed.username,
            },
            access_token: refreshed.access_token,
        }
    }
}
