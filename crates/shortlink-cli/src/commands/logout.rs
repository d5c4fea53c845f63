//! Logout command implementation.

use anyhow::Result;

use crate::context::App;
use crate::output;

pub fn run(app: &App) -> Result<()> {
    app.session().logout();
    output::success("Logged out");
    Ok(())
}
