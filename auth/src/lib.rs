//! Authentication core library
//!
//! Provides the credential and token primitives of the authentication service:
//! - Password hashing (Argon2id, configurable work factor)
//! - Access and refresh token issuance and validation (HS256 JWT, one secret per kind)
//! - Bearer credential resolution and authentication coordination
//!
//! The library performs no I/O. Storage and transport live in the service crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenKind, TokenService};
//!
//! let tokens = TokenService::new(b"access_secret_32_bytes_long_key!!", b"refresh_secret_32_bytes_long_key!");
//! let access = tokens.issue_access("alice").unwrap();
//! let claims = tokens.validate(&access, TokenKind::Access).unwrap();
//! assert_eq!(claims.username, "alice");
//! assert!(tokens.validate(&access, TokenKind::Refresh).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenKind, TokenService};
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::with_params(1024, 1, 1).unwrap(),
//!     TokenService::new(b"access_secret_32_bytes_long_key!!", b"refresh_secret_32_bytes_long_key!"),
//! );
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue both tokens
//! let pair = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Protected request: resolve the bearer credential
//! let header = format!("Bearer {}", pair.access_token);
//! let claims = auth.authenticate_bearer(Some(&header)).unwrap();
//! assert_eq!(claims.username, "alice");
//!
//! // Refresh: mint a new access token
//! let refresh = auth.validate_token(&pair.refresh_token, TokenKind::Refresh).unwrap();
//! let _access = auth.issue_access_token(&refresh.username).unwrap();
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::bearer_token;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenKind;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
