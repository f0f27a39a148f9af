use crate::error::TokenStoreError;
use crate::token_store::TokenStore;

use common::{ErrorLocation, RedactedToken};

use std::panic::Location;
use std::sync::RwLock;

/// Process-local token store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<RedactedToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(RedactedToken::new(token))),
        }
    }
}

#[track_caller]
fn poisoned() -> TokenStoreError {
    TokenStoreError::Poisoned {
        location: ErrorLocation::from(Location::caller()),
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<RedactedToken>, TokenStoreError> {
        let guard = self.token.read().map_err(|_| poisoned())?;
        Ok(guard.as_ref().filter(|t| !t.is_empty()).cloned())
    }

    fn set(&self, token: &RedactedToken) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().map_err(|_| poisoned())?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut guard = self.token.write().map_err(|_| poisoned())?;
        *guard = None;
        Ok(())
    }
}
