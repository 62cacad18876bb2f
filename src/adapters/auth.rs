use crate::domain::ports::{AuthProvider, TokenStore};
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Provider holding a token handed in up front (CLI flag or environment).
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn token(&self) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(ExportError::auth("no access token configured"));
        }
        Ok(self.token.clone())
    }
}

/// Provider reading the token from an injected [`TokenStore`], so whatever
/// sign-in flow ran earlier just has to deposit a token under the agreed key.
pub struct StoredTokenProvider {
    store: Arc<dyn TokenStore>,
    key: String,
}

impl StoredTokenProvider {
    pub fn new<S: Into<String>>(store: Arc<dyn TokenStore>, key: S) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for StoredTokenProvider {
    async fn token(&self) -> Result<String> {
        match self.store.get(&self.key) {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ExportError::auth(format!(
                "no token stored under '{}'; sign in first",
                self.key
            ))),
        }
    }
}

/// In-process token store.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new("abc");
        assert_eq!(provider.token().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_static_provider_rejects_blank_token() {
        let provider = StaticTokenProvider::new("  ");
        assert!(matches!(
            provider.token().await.unwrap_err(),
            ExportError::AuthFailure { .. }
        ));
    }

    #[tokio::test]
    async fn test_stored_provider_reads_from_store() {
        let store = Arc::new(MemoryTokenStore::new());
        store.set("sheets_token", "xyz");

        let provider = StoredTokenProvider::new(store, "sheets_token");
        assert_eq!(provider.token().await.unwrap(), "xyz");
    }

    #[tokio::test]
    async fn test_stored_provider_fails_when_missing() {
        let store = Arc::new(MemoryTokenStore::new());
        let provider = StoredTokenProvider::new(store, "sheets_token");

        assert!(matches!(
            provider.token().await.unwrap_err(),
            ExportError::AuthFailure { .. }
        ));
    }
}
