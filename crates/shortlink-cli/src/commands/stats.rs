//! Statistics commands.

use anyhow::Result;
use clap::Args;

use crate::context::App;
use crate::output;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Short code to inspect
    pub code: String,

    /// Scope the statistics to a user
    #[arg(long)]
    pub user_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct UserStatsArgs {
    /// User identifier
    pub user_id: String,
}

pub async fn url(args: StatsArgs, app: &App) -> Result<()> {
    let stats = app
        .authenticated(app.client.url_stats(&args.code, args.user_id.as_deref()))
        .await?;
    output::payload(&stats)
}

pub async fn mine(app: &App) -> Result<()> {
    let stats = app.authenticated(app.client.my_stats()).await?;
    output::payload(&stats)
}

pub async fn user(args: UserStatsArgs, app: &App) -> Result<()> {
    let stats = app
        .authenticated(app.client.user_stats(&args.user_id))
        .await?;
    output::payload(&stats)
}
