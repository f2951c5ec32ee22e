use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::MessageResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn profile(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<MessageResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: format!("Welcome {}", user.username),
        },
    )
}
