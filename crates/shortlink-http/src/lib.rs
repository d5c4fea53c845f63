//! shortlink-http - HTTP side of the shortlink client.
//!
//! Components are constructed explicitly and wired by the application:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shortlink_core::{ApiUrl, Credentials, MemoryStore};
//! use shortlink_http::{AuthSession, HttpTransport, RequestClient};
//!
//! # async fn example() -> Result<(), shortlink_core::Error> {
//! let transport = HttpTransport::new(ApiUrl::new("http://localhost:8080")?)?;
//! let session = AuthSession::new(transport, Arc::new(MemoryStore::new()));
//! let client = RequestClient::new(session.clone());
//!
//! let mut expired = client.subscribe();
//! session.login(&Credentials::new("a@b.com", "secret")).await;
//! let stats = client.my_stats().await?;
//! # let _ = (stats, expired.try_recv());
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod endpoints;
mod events;
mod refresh;
mod session;
mod transport;

pub use api::ShortenRequest;
pub use client::RequestClient;
pub use endpoints::{LOGIN, MY_STATS, REFRESH, REGISTER, SHORTEN};
pub use events::SessionEvents;
pub use session::AuthSession;
pub use transport::{ApiRequest, HttpTransport};

pub use reqwest::Method;
