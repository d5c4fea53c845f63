//! Single-flight coordination of refresh-token exchanges.

use std::sync::{Mutex, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

/// Whether a refresh installed new credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefreshOutcome {
    Refreshed,
    NotRefreshed,
}

type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Slot holding the one refresh exchange currently in flight.
///
/// The first caller starts the exchange; callers arriving while it is
/// pending await the same shared future. Every awaiter releases the slot
/// once the exchange has settled, and only if the slot still holds that
/// exchange, so a newer exchange is never discarded by a late waiter.
#[derive(Default)]
pub(crate) struct RefreshGate {
    pending: Mutex<Option<PendingRefresh>>,
}

impl RefreshGate {
    /// Await the in-flight exchange, or start one with `start`.
    pub(crate) async fn run<F>(&self, start: F) -> RefreshOutcome
    where
        F: FnOnce() -> BoxFuture<'static, RefreshOutcome>,
    {
        let operation = self.join_or_start(start);
        let outcome = operation.clone().await;
        self.release(&operation);
        outcome
    }

    /// True while an exchange is in flight.
    pub(crate) fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn join_or_start<F>(&self, start: F) -> PendingRefresh
    where
        F: FnOnce() -> BoxFuture<'static, RefreshOutcome>,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(operation) = pending.as_ref() {
            debug!("joining refresh already in flight");
            return operation.clone();
        }

        debug!("starting refresh");
        let operation = start().shared();
        *pending = Some(operation.clone());
        operation
    }

    fn release(&self, operation: &PendingRefresh) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending
            .as_ref()
            .is_some_and(|current| current.ptr_eq(operation))
        {
            *pending = None;
        }
    }
}
