//! Bearer token storage.
//!
//! The client never reaches for ambient storage: every read and write goes
//! through a [`TokenStore`] handed to it at construction time. Stores do not
//! validate token contents and do not track expiry; a session is found to be
//! stale only when the server answers 401.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::TokenStoreError;

use common::RedactedToken;

/// Get/set/clear access to the single stored bearer token.
///
/// An empty stored value reads back as `None`. `clear` is idempotent.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<RedactedToken>, TokenStoreError>;

    fn set(&self, token: &RedactedToken) -> Result<(), TokenStoreError>;

    fn clear(&self) -> Result<(), TokenStoreError>;

    fn has_token(&self) -> Result<bool, TokenStoreError> {
        Ok(self.get()?.is_some())
    }
}
