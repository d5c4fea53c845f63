//! Login, registration and the credential lifecycle.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use shortlink_core::{
    AccessToken, AuthResult, CredentialStore, Credentials, RefreshToken, Result, TokenSet, UserId,
};

use crate::endpoints::{AuthRequest, LOGIN, REGISTER, TokenResponse};
use crate::transport::{ApiRequest, HttpTransport};

/// Message for a registration rejected because the account exists.
const EMAIL_IN_USE: &str = "Email already in use. Please login or use a different email.";

/// Message for every other registration failure.
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Owner of the credential lifecycle.
///
/// `AuthSession` is the only writer of the [`CredentialStore`]. It is cheap to
/// clone (internal `Arc`); clones share the store.
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    transport: HttpTransport,
    store: Arc<dyn CredentialStore>,
}

impl AuthSession {
    pub fn new(transport: HttpTransport, store: Arc<dyn CredentialStore>) -> Self {
        let session = Self {
            inner: Arc::new(SessionInner { transport, store }),
        };
        debug!(
            authenticated = session.is_authenticated(),
            "auth session initialized"
        );
        session
    }

    /// Returns the transport used for auth calls.
    pub fn transport(&self) -> &HttpTransport {
        &self.inner.transport
    }

    /// Log in and install the returned credentials.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> AuthResult {
        info!("Logging in");
        match self.authenticate(LOGIN, credentials).await {
            Ok(()) => AuthResult::Success,
            Err(err) => {
                warn!(error = %err, "login failed");
                AuthResult::Failure(err.to_string())
            }
        }
    }

    /// Register a new account and install the returned credentials.
    ///
    /// A failure mentioning an existing account is reported as "email already
    /// in use"; every other failure gets a generic message.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn register(&self, credentials: &Credentials) -> AuthResult {
        info!("Registering account");
        match self.authenticate(REGISTER, credentials).await {
            Ok(()) => AuthResult::Success,
            Err(err) => {
                warn!(error = %err, "registration failed");
                let message = if err.to_string().to_lowercase().contains("already") {
                    EMAIL_IN_USE
                } else {
                    REGISTRATION_FAILED
                };
                AuthResult::Failure(message.to_string())
            }
        }
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> Result<()> {
        let request = ApiRequest::post(path).json(&AuthRequest {
            email: credentials.email(),
            password: credentials.password(),
        })?;

        let payload = self
            .inner
            .transport
            .execute(&request, None)
            .await?
            .into_result()?;

        self.install(TokenResponse::parse(payload)?);
        Ok(())
    }

    /// Install a credential triple. Nothing is written if a field is empty.
    pub fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<()> {
        let tokens = TokenSet::new(access_token, refresh_token, user_id)?;
        self.install(tokens);
        Ok(())
    }

    pub(crate) fn install(&self, tokens: TokenSet) {
        debug!(user_id = %tokens.user_id(), "installing credentials");
        self.inner.store.set(tokens);
    }

    /// Clear the stored credentials. Safe to call without a session.
    pub fn logout(&self) {
        debug!("clearing credentials");
        self.inner.store.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.store.is_authenticated()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.inner.store.get().map(|t| t.user_id().clone())
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        self.inner.store.get().map(|t| t.access_token().clone())
    }

    pub(crate) fn refresh_token(&self) -> Option<RefreshToken> {
        self.inner.store.get().map(|t| t.refresh_token().clone())
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("base", self.inner.transport.base())
            .field("authenticated", &self.is_authenticated())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
