//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{AccountArgs, CallArgs, ShortenArgs, StatsArgs, UserStatsArgs};

/// Command-line client for the shortlink URL shortener.
#[derive(Parser, Debug)]
#[command(name = "shortlink")]
#[command(author, version = env!("SHORTLINK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL
    #[arg(
        long,
        env = "SHORTLINK_API_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub api_url: String,

    /// Credential file (defaults to the per-user data directory)
    #[arg(long, env = "SHORTLINK_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Give up on a request after this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login(AccountArgs),

    /// Create an account and sign in
    Register(AccountArgs),

    /// Forget the stored credentials
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create a short link
    Shorten(ShortenArgs),

    /// Statistics for one short code
    Stats(StatsArgs),

    /// Statistics of the signed-in user
    MyStats,

    /// Statistics of a user
    UserStats(UserStatsArgs),

    /// Send an arbitrary request through the authenticated client
    Call(CallArgs),
}
