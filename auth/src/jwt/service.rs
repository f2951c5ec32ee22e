use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::TokenClaims;
use super::claims::TokenKind;
use super::errors::TokenError;
use super::handler::JwtHandler;

/// Issues and validates access and refresh tokens.
///
/// Tokens are stateless: validity is a function of signature, kind and expiry
/// only. Each kind has its own secret, so a token of one kind never validates
/// as the other.
pub struct TokenService {
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;
    pub const DEFAULT_REFRESH_TTL_HOURS: i64 = 24;

    /// Create a token service with the default lifetimes
    /// (15 minutes for access, 24 hours for refresh).
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
            access_ttl: Duration::minutes(Self::DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::hours(Self::DEFAULT_REFRESH_TTL_HOURS),
        }
    }

    /// Override token lifetimes.
    pub fn with_ttls(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    pub fn issue_access(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, TokenKind::Access, Utc::now())
    }

    pub fn issue_refresh(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, TokenKind::Refresh, Utc::now())
    }

    /// Issue a token of `kind` as if the current time were `now`.
    pub fn issue_at(
        &self,
        username: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims::new(username, kind, now, self.ttl(kind))?;
        self.handler(kind).encode(&claims)
    }

    /// Validate a token of the expected `kind` against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `InvalidSignature` - Signature check failed or the token is of another kind
    /// * `Expired` - `exp` is not in the future
    pub fn validate(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, TokenError> {
        self.validate_at(token, kind, Utc::now())
    }

    /// Validate a token of the expected `kind` as if the current time were `now`.
    pub fn validate_at(
        &self,
        token: &str,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenError> {
        let claims: TokenClaims = self.handler(kind).decode(token)?;

        // Only reachable when both kinds share a secret.
        if claims.kind != kind {
            return Err(TokenError::InvalidSignature);
        }

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn handler(&self, kind: TokenKind) -> &JwtHandler {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}
