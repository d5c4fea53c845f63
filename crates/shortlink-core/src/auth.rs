//! Outcome of a login or registration attempt.

/// Result of an auth operation: credentials installed, or a message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Success,
    Failure(String),
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success)
    }

    /// The failure message, if the operation failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            AuthResult::Success => None,
            AuthResult::Failure(message) => Some(message),
        }
    }
}
