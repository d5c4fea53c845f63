//! Authenticated request client with refresh-and-retry.
//!
//! Every call carries the stored access token. A 401/403 on the first
//! attempt triggers a refresh-token exchange shared by all concurrent
//! callers; if it installs new credentials the call is replayed once.
//! A failed exchange clears the session and broadcasts [`SessionExpired`].

use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use shortlink_core::error::TransportError;
use shortlink_core::{ApiUrl, Error, Result, SessionExpired};

use crate::endpoints::{REFRESH, RefreshRequest, TokenResponse};
use crate::events::SessionEvents;
use crate::refresh::{RefreshGate, RefreshOutcome};
use crate::session::AuthSession;
use crate::transport::{ApiRequest, HttpTransport};

/// Replays allowed per logical call after a successful refresh.
const MAX_REFRESH_RETRIES: u8 = 1;

/// Client for authenticated backend calls.
///
/// Cheap to clone; clones share the session, the pending-refresh slot and
/// the event channel, so one client (and its clones) per process gives the
/// single-flight guarantee process-wide.
#[derive(Clone)]
pub struct RequestClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: HttpTransport,
    session: AuthSession,
    refresh: RefreshGate,
    events: SessionEvents,
}

impl RequestClient {
    /// Create a client that authenticates through `session`.
    pub fn new(session: AuthSession) -> Self {
        Self::with_events(session, SessionEvents::new())
    }

    /// Create a client publishing expiry on an existing channel.
    pub fn with_events(session: AuthSession, events: SessionEvents) -> Self {
        let transport = session.transport().clone();
        info!(base = %transport.base(), "request client initialized");

        Self {
            inner: Arc::new(ClientInner {
                transport,
                session,
                refresh: RefreshGate::default(),
                events,
            }),
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.inner.session
    }

    pub fn base_url(&self) -> &ApiUrl {
        self.inner.transport.base()
    }

    /// Subscribe to session-expired notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionExpired> {
        self.inner.events.subscribe()
    }

    /// Execute a call, refreshing the access token and retrying once if the
    /// backend rejects it with 401/403.
    ///
    /// # Errors
    ///
    /// - [`Error::Protocol`](shortlink_core::Error::Protocol) for a non-2xx
    ///   status, including a 401/403 the refresh could not resolve
    /// - [`Error::Transport`](shortlink_core::Error::Transport) when the
    ///   backend is unreachable or the exchange breaks down
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn request(&self, request: &ApiRequest) -> Result<Value> {
        let mut attempt = 0;

        loop {
            let token = self.inner.session.access_token();
            let response = self.inner.transport.execute(request, token.as_ref()).await?;

            if response.is_auth_failure()
                && attempt < MAX_REFRESH_RETRIES
                && self.refresh_once().await == RefreshOutcome::Refreshed
            {
                attempt += 1;
                debug!(attempt, "retrying with refreshed credentials");
                continue;
            }

            return response.into_result();
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(&ApiRequest::get(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(&ApiRequest::post(path).with_body(body)).await
    }

    /// Join the refresh in flight, or start one.
    async fn refresh_once(&self) -> RefreshOutcome {
        let inner = Arc::clone(&self.inner);
        self.inner
            .refresh
            .run(move || async move { inner.exchange_refresh_token().await }.boxed())
            .await
    }
}

impl ClientInner {
    /// Trade the stored refresh token for a new credential triple.
    #[instrument(skip(self))]
    async fn exchange_refresh_token(&self) -> RefreshOutcome {
        let Some(refresh_token) = self.session.refresh_token() else {
            debug!("no refresh token stored");
            return RefreshOutcome::NotRefreshed;
        };

        info!("Refreshing session");

        let request = match ApiRequest::post(REFRESH).json(&RefreshRequest {
            refresh_token: refresh_token.as_str(),
        }) {
            Ok(request) => request,
            Err(err) => return self.expire(SessionExpired::refresh_exception(), &err),
        };

        let response = match self.transport.send(&request, None).await {
            Ok(response) => response,
            Err(err) => return self.expire(SessionExpired::refresh_exception(), &err),
        };

        // The status decides; the body is only read on success.
        if !response.status.is_success() {
            let status = response.status.as_u16();
            return self.expire(SessionExpired::refresh_failed(status), &response.status);
        }

        let tokens = response
            .json::<Value>()
            .map_err(|e| {
                Error::from(TransportError::Decode {
                    message: e.to_string(),
                })
            })
            .and_then(TokenResponse::parse);

        match tokens {
            Ok(tokens) => {
                self.session.install(tokens);
                debug!("Session refreshed successfully");
                RefreshOutcome::Refreshed
            }
            Err(err) => self.expire(SessionExpired::refresh_exception(), &err),
        }
    }

    fn expire(&self, event: SessionExpired, cause: &dyn std::fmt::Display) -> RefreshOutcome {
        warn!(cause = %cause, "refresh failed, clearing session");
        self.session.logout();
        self.events.publish(event);
        RefreshOutcome::NotRefreshed
    }
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("base", self.inner.transport.base())
            .field("refresh_pending", &self.inner.refresh.is_pending())
            .finish()
    }
}
