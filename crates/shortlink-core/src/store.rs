//! In-memory credential store.

use std::sync::{PoisonError, RwLock};

use crate::tokens::TokenSet;
use crate::traits::CredentialStore;

/// A [`CredentialStore`] that lives for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tokens: RwLock<Option<TokenSet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session.
    pub fn with_tokens(tokens: TokenSet) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<TokenSet> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, tokens: TokenSet) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Some(tokens);
    }

    fn clear(&self) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
