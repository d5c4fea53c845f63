//! Whoami command implementation.

use anyhow::{Context, Result};

use crate::context::App;
use crate::output;

pub fn run(app: &App) -> Result<()> {
    let user_id = app
        .session()
        .user_id()
        .context("No active session. Run 'shortlink login' first.")?;

    output::field("User ID", user_id.as_str());
    output::field("API", app.client.base_url().as_str());

    Ok(())
}
