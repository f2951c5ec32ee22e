use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordError;
use auth::TokenKind;
use chrono::Utc;

use crate::domain::user::models::LogInCommand;
use crate::domain::user::models::RefreshedAccess;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::SignedInUser;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<SignedInUser, UserError> {
        if command.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Password hashing task failed");
                    PasswordError::HashingFailed(e.to_string())
                })??;

        // Issued before the insert so a signing failure leaves nothing behind.
        let tokens = self.authenticator.issue_tokens(command.username.as_str())?;

        let user = User {
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(username = %created_user.username, "User signed up");

        Ok(SignedInUser {
            user: created_user,
            tokens,
        })
    }

    async fn log_in(&self, command: LogInCommand) -> Result<SignedInUser, UserError> {
        let Some(user) = self.repository.find_by_username(&command.username).await? else {
            tracing::debug!(username = %command.username, "Login for unknown username");
            return Err(UserError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = user.password_hash.clone();
        let username = user.username.as_str().to_string();
        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, &username)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            UserError::PasswordHashing(PasswordError::HashingFailed(e.to_string()))
        })??;
        tracing::info!(username = %user.username, "User logged in");

        Ok(SignedInUser { user, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, UserError> {
        let claims = self
            .authenticator
            .validate_token(refresh_token, TokenKind::Refresh)?;

        let access_token = self.authenticator.issue_access_token(&claims.username)?;
        tracing::debug!(username = %claims.username, "Access token refreshed");

        Ok(RefreshedAccess {
            username: claims.username,
            access_token,
        })
    }
}
