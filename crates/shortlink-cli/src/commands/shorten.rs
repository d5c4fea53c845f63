//! Shorten command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use shortlink_http::ShortenRequest;

use crate::context::App;
use crate::output;

#[derive(Args, Debug)]
pub struct ShortenArgs {
    /// URL to shorten
    pub url: String,

    /// Custom alias for the short code
    #[arg(long)]
    pub alias: Option<String>,

    /// Expire the link after this many days
    #[arg(long)]
    pub expires_in_days: Option<u32>,

    /// Always create a new link, even if this URL was shortened before
    #[arg(long)]
    pub no_reuse: bool,
}

pub async fn run(args: ShortenArgs, app: &App) -> Result<()> {
    let mut request = ShortenRequest::new(args.url).reuse_existing(!args.no_reuse);
    if let Some(alias) = args.alias {
        request = request.custom_alias(alias);
    }
    if let Some(days) = args.expires_in_days {
        request = request.expiration_days(days);
    }

    let created = app.authenticated(app.client.shorten(&request)).await?;

    match short_link(&created, app) {
        Some(link) => {
            println!("{link}");
            output::success("Short link created");
            Ok(())
        }
        None => output::payload(&created),
    }
}

/// The backend's `shortUrl`, or one built from `shortCode`.
fn short_link(created: &Value, app: &App) -> Option<String> {
    if let Some(url) = created.get("shortUrl").and_then(Value::as_str) {
        return Some(url.to_string());
    }
    created
        .get("shortCode")
        .and_then(Value::as_str)
        .map(|code| app.client.base_url().open_url(code))
}
