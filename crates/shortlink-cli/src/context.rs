//! Wiring of store, session and request client for one invocation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use shortlink_core::ApiUrl;
use shortlink_http::{AuthSession, HttpTransport, RequestClient};

use crate::cli::Cli;
use crate::output;
use crate::store::FileStore;

/// Shown when a failed refresh has signed the user out.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Everything a command needs to talk to the backend.
pub struct App {
    pub client: RequestClient,
}

impl App {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api = ApiUrl::new(&cli.api_url).context("Invalid API URL")?;

        let transport = match cli.timeout_secs {
            Some(secs) => HttpTransport::with_timeout(api, Duration::from_secs(secs)),
            None => HttpTransport::new(api),
        }
        .context("Failed to create HTTP client")?;

        let store = FileStore::open(cli.store.clone()).context("Failed to open credential store")?;
        let session = AuthSession::new(transport, Arc::new(store));

        Ok(Self {
            client: RequestClient::new(session),
        })
    }

    pub fn session(&self) -> &AuthSession {
        self.client.session()
    }

    /// Run a backend call, telling the user if it ended their session.
    pub async fn authenticated<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = shortlink_core::Result<T>>,
    {
        let mut expired = self.client.subscribe();
        let result = call.await;

        if let Ok(event) = expired.try_recv() {
            debug!(reason = event.reason.as_str(), status = ?event.status, "session expired");
            output::error(SESSION_EXPIRED);
        }

        Ok(result?)
    }
}
