use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::repositories::reset_tokens::ResetTokenStore;

/// In-memory token store. One pending token per email; a new request
/// replaces the old token.
#[derive(Default)]
pub struct InMemoryResetTokenStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemoryResetTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResetTokenStore for InMemoryResetTokenStore {
    async fn put(&self, email: &str, token: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(email.to_string(), (token.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn take(&self, email: &str, token: &str) -> Result<bool> {
        let mut entries = self.entries.lock().await;

        let valid = match entries.get(email) {
            Some((stored, expires_at)) => stored == token && Instant::now() < *expires_at,
            None => false,
        };

        // Drop the entry on any match attempt against a stored token, valid
        // or expired. Only a stored-token mismatch leaves it in place.
        if valid {
            entries.remove(email);
        } else if let Some((_, expires_at)) = entries.get(email) {
            if Instant::now() >= *expires_at {
                entries.remove(email);
            }
        }

        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_is_single_use() {
        let store = InMemoryResetTokenStore::new();
        store
            .put("alice@example.com", "tok123", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(store.take("alice@example.com", "tok123").await.unwrap());
        assert!(!store.take("alice@example.com", "tok123").await.unwrap());
    }

    #[tokio::test]
    async fn wrong_token_is_rejected_and_kept() {
        let store = InMemoryResetTokenStore::new();
        store
            .put("alice@example.com", "tok123", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(!store.take("alice@example.com", "wrong").await.unwrap());
        // The real token still works afterwards.
        assert!(store.take("alice@example.com", "tok123").await.unwrap());
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let store = InMemoryResetTokenStore::new();
        store
            .put("alice@example.com", "tok123", Duration::from_millis(10))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!store.take("alice@example.com", "tok123").await.unwrap());
    }

    #[tokio::test]
    async fn new_request_replaces_old_token() {
        let store = InMemoryResetTokenStore::new();
        store
            .put("alice@example.com", "old", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .put("alice@example.com", "new", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(!store.take("alice@example.com", "old").await.unwrap());
        assert!(store.take("alice@example.com", "new").await.unwrap());
    }
}
