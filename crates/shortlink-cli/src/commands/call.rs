//! Raw request command, for exploring the backend.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use shortlink_http::{ApiRequest, Method};

use crate::context::App;
use crate::output;

#[derive(Args, Debug)]
pub struct CallArgs {
    /// HTTP method (GET, POST, DELETE, ...)
    pub method: String,

    /// Path relative to the API URL, e.g. /users/me/stats
    pub path: String,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,

    /// Extra header as "Name: value"; overrides the client's own headers
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
}

pub async fn run(args: CallArgs, app: &App) -> Result<()> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method: {}", args.method))?;

    let mut request = ApiRequest::new(method, args.path);

    if let Some(body) = &args.body {
        let body: Value = serde_json::from_str(body).context("Invalid JSON body")?;
        request = request.with_body(body);
    }

    for header in &args.headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("Header must be 'Name: value': {header}"))?;
        request = request.header(name.trim(), value.trim())?;
    }

    let payload = app.authenticated(app.client.request(&request)).await?;
    output::payload(&payload)
}
