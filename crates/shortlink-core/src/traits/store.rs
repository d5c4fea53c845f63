//! Credential storage trait.

use crate::tokens::TokenSet;

/// Durable storage for the credential triple.
///
/// `set` and `clear` are atomic: a reader sees either the whole triple or
/// nothing. Implementations never surface storage errors; a store that cannot
/// persist a triple must behave as if `clear` had been called.
pub trait CredentialStore: Send + Sync {
    /// Returns the current credential triple, if any.
    fn get(&self) -> Option<TokenSet>;

    /// Replaces the stored triple.
    fn set(&self, tokens: TokenSet);

    /// Removes the stored triple. Clearing an empty store is a no-op.
    fn clear(&self);

    /// True iff an access token and a user id are stored.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
