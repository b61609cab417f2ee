use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ryujin_utils::time::now_unix_secs;

use crate::blacklist::BlacklistStore;
use crate::warnings::{InfractionEntry, InfractionRecord, InfractionStore};

/// Warning entries plus the ID counter, guarded together so IDs are pushed in order.
#[derive(Default)]
struct WarningLog {
    last_id: i64,
    entries: HashMap<(u64, u64), Vec<InfractionEntry>>,
}

/// Blacklist and warning storage kept in process memory, used by tests.
#[derive(Default)]
pub struct MemoryStore {
    warnings: RwLock<WarningLog>,
    blacklist: RwLock<HashMap<u64, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn blacklist_user(&self, user_id: u64, reason: &str) {
        self.blacklist
            .write()
            .await
            .insert(user_id, reason.to_owned());
    }

    pub async fn unblacklist_user(&self, user_id: u64) -> bool {
        self.blacklist.write().await.remove(&user_id).is_some()
    }
}

#[async_trait]
impl InfractionStore for MemoryStore {
    async fn record(
        &self,
        guild_id: u64,
        target_id: u64,
        moderator_id: u64,
        reason: &str,
    ) -> anyhow::Result<InfractionRecord> {
        let mut log = self.warnings.write().await;
        log.last_id += 1;
        let id = log.last_id;

        log.entries
            .entry((guild_id, target_id))
            .or_default()
            .push(InfractionEntry {
                id,
                moderator_id,
                reason: reason.to_owned(),
                created_at: now_unix_secs(),
            });

        Ok(InfractionRecord { id })
    }

    async fn query(&self, guild_id: u64, target_id: u64) -> anyhow::Result<Vec<InfractionEntry>> {
        let log = self.warnings.read().await;
        Ok(log
            .entries
            .get(&(guild_id, target_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn count(&self, guild_id: u64, target_id: u64) -> anyhow::Result<u64> {
        let log = self.warnings.read().await;
        Ok(log
            .entries
            .get(&(guild_id, target_id))
            .map_or(0, |entries| entries.len() as u64))
    }
}

#[async_trait]
impl BlacklistStore for MemoryStore {
    async fn is_blacklisted(&self, user_id: u64) -> anyhow::Result<Option<String>> {
        Ok(self.blacklist.read().await.get(&user_id).cloned())
    }
}
