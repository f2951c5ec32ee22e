use async_trait::async_trait;

use crate::domain::user::models::LogInCommand;
use crate::domain::user::models::RefreshedAccess;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::SignedInUser;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for the credential flows.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue both tokens.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username and password
    ///
    /// # Returns
    /// Created user with an access/refresh token pair
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `PasswordHashing` - Password could not be hashed
    /// * `TokenIssuance` - Tokens could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<SignedInUser, UserError>;

    /// Verify credentials and issue both tokens.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `TokenIssuance` - Tokens could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn log_in(&self, command: LogInCommand) -> Result<SignedInUser, UserError>;

    /// Mint a new access token from a refresh token. The refresh token is not rotated.
    ///
    /// # Errors
    /// * `InvalidToken` - Refresh token is malformed, forged, of the wrong kind or expired
    /// * `TokenIssuance` - Access token could not be signed
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, UserError>;
}

/// Credential store.
///
/// Implementations must enforce username uniqueness atomically and report a
/// violation as `UsernameAlreadyExists`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - A user with this username exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Look up a user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
