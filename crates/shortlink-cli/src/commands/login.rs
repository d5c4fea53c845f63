//! Login and register commands.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use shortlink_core::{AuthResult, Credentials};

use crate::context::App;
use crate::output;

#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "SHORTLINK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl AccountArgs {
    fn credentials(&self) -> Credentials {
        Credentials::new(&self.email, &self.password)
    }
}

pub async fn login(args: AccountArgs, app: &App) -> Result<()> {
    eprintln!("{}", "Logging in...".dimmed());
    let result = app.session().login(&args.credentials()).await;
    report(result, "Logged in successfully", app)
}

pub async fn register(args: AccountArgs, app: &App) -> Result<()> {
    eprintln!("{}", "Creating account...".dimmed());
    let result = app.session().register(&args.credentials()).await;
    report(result, "Account created", app)
}

fn report(result: AuthResult, done: &str, app: &App) -> Result<()> {
    if let AuthResult::Failure(message) = result {
        bail!(message);
    }

    output::success(done);
    println!();
    if let Some(user_id) = app.session().user_id() {
        output::field("User ID", user_id.as_str());
    }
    output::field("API", app.client.base_url().as_str());

    Ok(())
}
