use async_trait::async_trait;

use ryujin_utils::time::now_unix_secs;

use crate::Database;

/// One stored warning, as shown in a user's history.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InfractionEntry {
    pub id: i64,
    pub moderator_id: u64,
    pub reason: String,
    pub created_at: u64,
}

/// Identifier handed back after a warning is stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InfractionRecord {
    pub id: i64,
}

/// Storage for per-guild user warnings.
#[async_trait]
pub trait InfractionStore: Send + Sync {
    /// Record a warning for a target user.
    async fn record(
        &self,
        guild_id: u64,
        target_id: u64,
        moderator_id: u64,
        reason: &str,
    ) -> anyhow::Result<InfractionRecord>;

    /// All warnings for a user in a guild, oldest first.
    async fn query(&self, guild_id: u64, target_id: u64) -> anyhow::Result<Vec<InfractionEntry>>;

    /// Number of warnings for a user in a guild.
    async fn count(&self, guild_id: u64, target_id: u64) -> anyhow::Result<u64>;
}

// Snowflakes fit in 63 bits, so the BIGINT round trip is lossless.
fn to_db_id(id: u64) -> i64 {
    id as i64
}

fn from_db_id(id: i64) -> u64 {
    id as u64
}

#[async_trait]
impl InfractionStore for Database {
    async fn record(
        &self,
        guild_id: u64,
        target_id: u64,
        moderator_id: u64,
        reason: &str,
    ) -> anyhow::Result<InfractionRecord> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO warnings (guild_id, user_id, moderator_id, reason, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(to_db_id(guild_id))
        .bind(to_db_id(target_id))
        .bind(to_db_id(moderator_id))
        .bind(reason)
        .bind(now_unix_secs() as i64)
        .fetch_one(self.pool())
        .await?;

        Ok(InfractionRecord { id })
    }

    async fn query(&self, guild_id: u64, target_id: u64) -> anyhow::Result<Vec<InfractionEntry>> {
        let rows = sqlx::query_as::<_, (i64, i64, String, i64)>(
            "SELECT id, moderator_id, reason, created_at FROM warnings \
             WHERE guild_id = $1 AND user_id = $2 ORDER BY id",
        )
        .bind(to_db_id(guild_id))
        .bind(to_db_id(target_id))
        .fetch_all(self.pool())
        .await?;

        let entries = rows
            .into_iter()
            .map(|(id, moderator_id, reason, created_at)| InfractionEntry {
                id,
                moderator_id: from_db_id(moderator_id),
                reason,
                created_at: created_at.max(0) as u64,
            })
            .collect();

        Ok(entries)
    }

    async fn count(&self, guild_id: u64, target_id: u64) -> anyhow::Result<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM warnings WHERE guild_id = $1 AND user_id = $2",
        )
        .bind(to_db_id(guild_id))
        .bind(to_db_id(target_id))
        .fetch_one(self.pool())
        .await?;

        Ok(count.max(0) as u64)
    }
}
