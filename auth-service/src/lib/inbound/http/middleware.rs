use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use auth::AuthenticationError;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated username in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Middleware that validates the bearer access token and adds the user to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Preflight never carries credentials.
    if req.method() == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = state
        .authenticator
        .authenticate_bearer(authorization)
        .map_err(|e| match e {
            AuthenticationError::MissingCredential => {
                ApiError::Unauthorized("Missing Authorization header".to_string())
            }
            other => {
                tracing::warn!(error = %other, "Access token rejected");
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        username: claims.username,
    });

    Ok(next.run(req).await)
}
