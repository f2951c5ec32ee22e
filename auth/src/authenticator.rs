use crate::jwt::TokenClaims;
use crate::jwt::TokenError;
use crate::jwt::TokenKind;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication coordinator combining password verification and token handling.
///
/// Holds the process-wide signing secrets and hashing parameters; it is
/// read-only after construction and meant to be shared behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Access and refresh token issued together on signup or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    pub fn new(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `username` - Identity to encode in the tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is unreadable)
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        username: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(username)?)
    }

    /// Issue an access/refresh token pair without password verification.
    ///
    /// Used right after signup, when the credential has just been set.
    pub fn issue_tokens(&self, username: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.token_service.issue_access(username)?,
            refresh_token: self.token_service.issue_refresh(username)?,
        })
    }

    pub fn issue_access_token(&self, username: &str) -> Result<String, TokenError> {
        self.token_service.issue_access(username)
    }

    /// Validate a token of the given kind.
    pub fn validate_token(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, TokenError> {
        self.token_service.validate(token, kind)
    }

    /// Resolve the identity behind an `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, `None` when the header is absent
    ///
    /// # Errors
    /// * `MissingCredential` - No header, or not a non-empty `Bearer` credential
    /// * `Token` - The bearer token is not a valid access token
    pub fn authenticate_bearer(
        &self,
        authorization: Option<&str>,
    ) -> Result<TokenClaims, AuthenticationError> {
        let token = bearer_token(authorization)?;
        Ok(self.token_service.validate(token, TokenKind::Access)?)
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthenticationError> {
    authorization
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthenticationError::MissingCredential)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    const ACCESS_SECRET: &[u8] = b"access_secret_at_least_32_bytes_long!";
    const REFRESH_SECRET: &[u8] = b"refresh_secret_at_least_32_bytes_long";

    fn authenticator() -> Authenticator {
        Authenticator::new(
            PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher"),
            TokenService::new(ACCESS_SECRET, REFRESH_SECRET),
        )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let tokens = authenticator
            .authenticate(password, &hash, "alice")
            .expect("Authentication failed");

        let access = authenticator
            .validate_token(&tokens.access_token, TokenKind::Access)
            .expect("Access token validation failed");
        let refresh = authenticator
            .validate_token(&tokens.refresh_token, TokenKind::Refresh)
            .expect("Refresh token validation failed");

        assert_eq!(access.username, "alice");
        assert_eq!(refresh.username, "alice");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "alice");
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let result = authenticator().authenticate("my_password", "not-a-hash", "alice");
        assert_eq!(result, Err(AuthenticationError::InvalidCredentials));
    }

    #[test]
    fn test_issue_access_token() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_access_token("alice")
            .expect("Failed to issue token");
        let claims = authenticator
            .validate_token(&token, TokenKind::Access)
            .expect("Failed to validate token");

        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(
            bearer_token(None),
            Err(AuthenticationError::MissingCredential)
        );
        assert_eq!(
            bearer_token(Some("")),
            Err(AuthenticationError::MissingCredential)
        );
        assert_eq!(
            bearer_token(Some("Bearer ")),
            Err(AuthenticationError::MissingCredential)
        );
        assert_eq!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthenticationError::MissingCredential)
        );
    }

    #[test]
    fn test_authenticate_bearer() {
        let authenticator = authenticator();
        let token = authenticator
            .issue_access_token("alice")
            .expect("Failed to issue token");

        let claims = authenticator
            .authenticate_bearer(Some(&format!("Bearer {token}")))
            .expect("Bearer authentication failed");
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_authenticate_bearer_missing_header() {
        assert_eq!(
            authenticator().authenticate_bearer(None),
            Err(AuthenticationError::MissingCredential)
        );
    }

    #[test]
    fn test_authenticate_bearer_rejects_refresh_token() {
        let authenticator = authenticator();
        let tokens = authenticator
            .issue_tokens("alice")
            .expect("Failed to issue tokens");

        let result =
            authenticator.authenticate_bearer(Some(&format!("Bearer {}", tokens.refresh_token)));
        assert_eq!(
            result,
            Err(AuthenticationError::Token(TokenError::InvalidSignature))
        );
    }

    #[test]
    fn test_authenticate_bearer_expired_token() {
        let service = TokenService::new(ACCESS_SECRET, REFRESH_SECRET);
        let token = service
            .issue_at("alice", TokenKind::Access, Utc::now() - Duration::hours(1))
            .expect("Failed to issue token");

        let result = authenticator().authenticate_bearer(Some(&format!("Bearer {token}")));
        assert_eq!(result, Err(AuthenticationError::Token(TokenError::Expired)));
    }
}
