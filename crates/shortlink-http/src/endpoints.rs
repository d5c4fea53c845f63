//! Backend endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use shortlink_core::{Error, Result, TokenSet};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST, `{email, password}` -> credential triple
pub const LOGIN: &str = "/auth/login";

/// POST, `{email, password}` -> credential triple
pub const REGISTER: &str = "/auth/register";

/// POST, `{refreshToken}` -> credential triple
pub const REFRESH: &str = "/auth/refresh";

/// POST, shorten request body
pub const SHORTEN: &str = "/shorten";

/// GET, statistics of the signed-in user
pub const MY_STATS: &str = "/users/me/stats";

/// `/stats/{code}`, with an optional `userId` query parameter.
pub(crate) fn url_stats_path(short_code: &str, user_id: Option<&str>) -> String {
    let path = format!("/stats/{}", urlencoding::encode(short_code));
    match user_id {
        Some(id) => format!("{}?userId={}", path, urlencoding::encode(id)),
        None => path,
    }
}

/// `/users/{id}/stats`
pub(crate) fn user_stats_path(user_id: &str) -> String {
    format!("/users/{}/stats", urlencoding::encode(user_id))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login and register.
#[derive(Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for refresh.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from login, register and refresh.
///
/// Every field is optional on the wire; [`TokenResponse::parse`]
/// decides whether the triple is complete.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user_id: Option<Value>,
}

impl TokenResponse {
    /// Parse a decoded response payload into a complete credential triple.
    pub(crate) fn parse(payload: Value) -> Result<TokenSet> {
        let response: TokenResponse =
            serde_json::from_value(payload).map_err(|_| Error::InvalidResponse)?;
        response.into_token_set()
    }

    fn into_token_set(self) -> Result<TokenSet> {
        let user_id = match self.user_id {
            Some(Value::String(id)) => id,
            // A numeric id of 0 is treated as absent, like an empty string.
            Some(Value::Number(id)) if id.as_f64() != Some(0.0) => id.to_string(),
            _ => return Err(Error::InvalidResponse),
        };

        TokenSet::new(
            self.access_token.unwrap_or_default(),
            self.refresh_token.unwrap_or_default(),
            user_id,
        )
        .map_err(|_| Error::InvalidResponse)
    }
}
