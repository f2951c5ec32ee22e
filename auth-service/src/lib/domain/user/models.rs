use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered user. Created on signup, never mutated.
#[derive(Debug, Clone)]
pub struct User {
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Username value type
///
/// Non-empty (ignoring surrounding whitespace), at most 64 characters, no control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty or whitespace only
    /// * `TooLong` - Username longer than 64 characters
    /// * `InvalidCharacters` - Contains control characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = username.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if username.chars().any(char::is_control) {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct SignUpCommand {
    pub username: Username,
    pub password: String,
}

impl SignUpCommand {
    /// Construct a new signup command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

/// Command to authenticate an existing user
#[derive(Debug)]
pub struct LogInCommand {
    pub username: Username,
    pub password: String,
}

/// A user together with a freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub user: User,
    pub tokens: auth::TokenPair,
}

/// A new access token minted from a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedAccess {
    pub username: String,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["alice", "a", "Bob_99", "jean-luc", "zoë", "first last"] {
            let username = Username::new(name.to_string()).expect("valid username");
            assert_eq!(username.as_str(), name);
        }
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(Username::new(String::new()), Err(UsernameError::Empty));
        assert_eq!(Username::new("   ".to_string()), Err(UsernameError::Empty));
    }

    #[test]
    fn test_username_too_long() {
        let result = Username::new("a".repeat(65));
        assert_eq!(
            result,
            Err(UsernameError::TooLong {
                max: 64,
                actual: 65
            })
        );
        assert!(Username::new("a".repeat(64)).is_ok());
    }

    #[test]
    fn test_username_control_characters() {
        assert_eq!(
            Username::new("alice\n".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("al\u{0}ice".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }
}
