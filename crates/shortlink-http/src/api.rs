//! Shortener and statistics calls.
//!
//! These forward to the backend through [`RequestClient::request`] and return
//! its JSON untouched; interpreting the payload is up to the caller.

use serde::Serialize;
use serde_json::Value;

use shortlink_core::Result;

use crate::client::RequestClient;
use crate::endpoints::{MY_STATS, SHORTEN, url_stats_path, user_stats_path};
use crate::transport::ApiRequest;

/// Request body for `/shorten`.
///
/// Unset options are sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub url: String,
    pub custom_alias: Option<String>,
    pub expiration_days: Option<u32>,
    pub reuse_existing: bool,
}

impl ShortenRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            custom_alias: None,
            expiration_days: None,
            reuse_existing: true,
        }
    }

    /// Ask for a specific alias. An empty alias counts as none.
    pub fn custom_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.custom_alias = (!alias.is_empty()).then_some(alias);
        self
    }

    /// Expire the link after `days`. Zero counts as no expiry.
    pub fn expiration_days(mut self, days: u32) -> Self {
        self.expiration_days = (days > 0).then_some(days);
        self
    }

    pub fn reuse_existing(mut self, reuse: bool) -> Self {
        self.reuse_existing = reuse;
        self
    }
}

impl RequestClient {
    /// Create a short link.
    pub async fn shorten(&self, request: &ShortenRequest) -> Result<Value> {
        self.request(&ApiRequest::post(SHORTEN).json(request)?).await
    }

    /// Statistics for one short code, optionally scoped to a user.
    pub async fn url_stats(&self, short_code: &str, user_id: Option<&str>) -> Result<Value> {
        self.get(&url_stats_path(short_code, user_id)).await
    }

    /// Statistics of the signed-in user.
    pub async fn my_stats(&self) -> Result<Value> {
        self.get(MY_STATS).await
    }

    /// Statistics of any user.
    pub async fn user_stats(&self, user_id: &str) -> Result<Value> {
        self.get(&user_stats_path(user_id)).await
    }
}
