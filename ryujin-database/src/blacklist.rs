use async_trait::async_trait;

use crate::Database;

/// Lookup for users who may not run any command.
#[async_trait]
pub trait BlacklistStore: Send + Sync {
    /// The blacklist reason when the user is blacklisted.
    async fn is_blacklisted(&self, user_id: u64) -> anyhow::Result<Option<String>>;
}

#[async_trait]
impl BlacklistStore for Database {
    async fn is_blacklisted(&self, user_id: u64) -> anyhow::Result<Option<String>> {
        let reason =
            sqlx::query_scalar::<_, String>("SELECT reason FROM blacklist WHERE user_id = $1")
                .bind(user_id as i64)
                .fetch_optional(self.pool())
                .await?;

        Ok(reason)
    }
}
