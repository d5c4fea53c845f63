//! shortlink-core - Core types and traits for the shortlink client.
//!
//! Everything here is transport-agnostic: the credential triple and its
//! store, login credentials, the error taxonomy and the session-expiry event
//! payload. The HTTP side lives in `shortlink-http`.

pub mod auth;
pub mod credentials;
pub mod error;
pub mod events;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use auth::AuthResult;
pub use credentials::Credentials;
pub use error::Error;
pub use events::{ExpiryReason, SessionExpired};
pub use store::MemoryStore;
pub use tokens::{AccessToken, RefreshToken, TokenSet, UserId};
pub use traits::CredentialStore;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
