use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Isolated credential file and backend URL for one test.
pub struct Env {
    pub dir: TempDir,
    pub api_url: String,
}

impl Env {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            api_url: api_url.into(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("credentials.json")
    }

    /// Write a credential file as a previous login would have.
    pub fn seed_credentials(&self, access_token: &str, refresh_token: &str, user_id: &str) {
        let stored = serde_json::json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
            "user_id": user_id,
            "saved_at": "2026-01-01T00:00:00Z",
        });
        std::fs::write(self.store_path(), stored.to_string()).expect("Failed to seed credentials");
    }

    pub fn stored_credentials(&self) -> Option<serde_json::Value> {
        let json = std::fs::read_to_string(self.store_path()).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Run the CLI binary on a blocking thread so the mock server keeps serving.
    pub async fn run(&self, args: &[&str]) -> Output {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let store = self.store_path();
        let api_url = self.api_url.clone();

        tokio::task::spawn_blocking(move || run_cli(&args, &store, &api_url))
            .await
            .expect("CLI task panicked")
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure, returning stderr.
    pub async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

fn run_cli(args: &[String], store: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shortlink"));
    cmd.args(args);
    cmd.env("SHORTLINK_API_URL", api_url);
    cmd.env("SHORTLINK_STORE", store);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("SHORTLINK_PASSWORD");
    cmd.output().expect("Failed to execute CLI")
}
