//! Session-expiry notification payload.

use serde::Serialize;

/// Why the session could not be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryReason {
    /// The refresh endpoint answered with a non-success status.
    RefreshFailed,
    /// The refresh exchange could not complete (transport error, bad body).
    RefreshException,
}

impl ExpiryReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryReason::RefreshFailed => "refresh_failed",
            ExpiryReason::RefreshException => "refresh_exception",
        }
    }
}

/// Broadcast after a failed refresh has cleared the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionExpired {
    pub reason: ExpiryReason,
    /// Status of the refresh response, for `RefreshFailed` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl SessionExpired {
    pub fn refresh_failed(status: u16) -> Self {
        Self {
            reason: ExpiryReason::RefreshFailed,
            status: Some(status),
        }
    }

    pub fn refresh_exception() -> Self {
        Self {
            reason: ExpiryReason::RefreshException,
            status: None,
        }
    }
}
