use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// Short-lived password-reset token store keyed by email. Tokens are single
/// use: a successful `take` removes the entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResetTokenStore {
    async fn put(&self, email: &str, token: &str, ttl: Duration) -> Result<()>;

    /// Returns true and deletes the entry when the token matches and has not
    /// expired.
    async fn take(&self, email: &str, token: &str) -> Result<bool>;
}
