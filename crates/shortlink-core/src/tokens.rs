//! Token types and the credential triple.

use std::fmt;

use crate::error::InvalidInputError;

/// An access token sent in the `Authorization` header of every call.
///
/// The value is stored exactly as the backend issued it (including any
/// `Bearer ` prefix) and replayed verbatim.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token, exchanged at `/auth/refresh` for a new triple.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// Identifier of the signed-in user, always held in string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The full credential triple.
///
/// A `TokenSet` always has all three fields non-empty, so a store holding
/// `Option<TokenSet>` can never expose a partial session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    access_token: AccessToken,
    refresh_token: RefreshToken,
    user_id: UserId,
}

impl TokenSet {
    /// Build a credential triple, rejecting empty fields.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, InvalidInputError> {
        let access_token = non_empty(access_token.into(), "access token")?;
        let refresh_token = non_empty(refresh_token.into(), "refresh token")?;
        let user_id = non_empty(user_id.into(), "user id")?;

        Ok(Self {
            access_token: AccessToken(access_token),
            refresh_token: RefreshToken(refresh_token),
            user_id: UserId(user_id),
        })
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, InvalidInputError> {
    if value.is_empty() {
        Err(InvalidInputError::EmptyField { field })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn token_set_debug_hides_both_tokens() {
        let tokens = TokenSet::new("Bearer secret-access", "secret-refresh", "7").unwrap();
        let debug = format!("{:?}", tokens);
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
        assert!(debug.contains("\"7\""));
    }

    #[test]
    fn token_set_rejects_empty_fields() {
        assert!(matches!(
            TokenSet::new("", "r", "1"),
            Err(InvalidInputError::EmptyField { field: "access token" })
        ));
        assert!(matches!(
            TokenSet::new("a", "", "1"),
            Err(InvalidInputError::EmptyField { field: "refresh token" })
        ));
        assert!(matches!(
            TokenSet::new("a", "r", ""),
            Err(InvalidInputError::EmptyField { field: "user id" })
        ));
    }

    #[test]
    fn token_set_keeps_values_verbatim() {
        let tokens = TokenSet::new("Bearer X", "R", "7").unwrap();
        assert_eq!(tokens.access_token().as_str(), "Bearer X");
        assert_eq!(tokens.refresh_token().as_str(), "R");
        assert_eq!(tokens.user_id().to_string(), "7");
    }
}
