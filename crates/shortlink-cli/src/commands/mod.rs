//! Subcommand implementations.

mod call;
mod login;
mod logout;
mod shorten;
mod stats;
mod whoami;

use anyhow::Result;

use crate::cli::Commands;
use crate::context::App;

pub use call::CallArgs;
pub use login::AccountArgs;
pub use shorten::ShortenArgs;
pub use stats::{StatsArgs, UserStatsArgs};

pub async fn handle(command: Commands, app: &App) -> Result<()> {
    match command {
        Commands::Login(args) => login::login(args, app).await,
        Commands::Register(args) => login::register(args, app).await,
        Commands::Logout => logout::run(app),
        Commands::Whoami => whoami::run(app),
        Commands::Shorten(args) => shorten::run(args, app).await,
        Commands::Stats(args) => stats::url(args, app).await,
        Commands::MyStats => stats::mine(app).await,
        Commands::UserStats(args) => stats::user(args, app).await,
        Commands::Call(args) => call::run(args, app).await,
    }
}
