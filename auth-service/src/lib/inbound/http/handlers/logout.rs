use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageResponseData;

/// Tokens are stateless; logging out is the client discarding them.
pub async fn logout() -> ApiSuccess<MessageResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "Logged out successfully".to_string(),
        },
    )
}
