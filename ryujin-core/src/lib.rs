use std::sync::Arc;

use twilight_http::Client;
use twilight_model::id::{Id, marker::UserMarker};

use ryujin_database::{blacklist::BlacklistStore, warnings::InfractionStore};

/// Environment-driven bot configuration.
pub mod config;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub bot_user_id: Id<UserMarker>,
    pub infractions: Arc<dyn InfractionStore>,
    /// `None` when the blacklist feature is switched off.
    pub blacklist: Option<Arc<dyn BlacklistStore>>,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        bot_user_id: Id<UserMarker>,
        infractions: Arc<dyn InfractionStore>,
        blacklist: Option<Arc<dyn BlacklistStore>>,
    ) -> Self {
        Self {
            http,
            bot_user_id,
            infractions,
            blacklist,
        }
    }

    /// Blacklist reason for a user, if the feature is on and the user is listed.
    pub async fn blacklist_reason(
        &self,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<Option<String>> {
        blacklist_reason(self.blacklist.as_deref(), user_id).await
    }
}

/// Look a user up in an optional blacklist; a missing store blocks nobody.
pub async fn blacklist_reason(
    store: Option<&dyn BlacklistStore>,
    user_id: Id<UserMarker>,
) -> anyhow::Result<Option<String>> {
    match store {
        Some(store) => store.is_blacklisted(user_id.get()).await,
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use ryujin_database::memory::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn blacklisted_user_reports_reason() {
        let store = MemoryStore::new();
        store.blacklist_user(7, "abuse").await;

        assert_eq!(
            blacklist_reason(Some(&store), Id::new(7))
                .await
                .unwrap()
                .as_deref(),
            Some("abuse")
        );
        assert_eq!(
            blacklist_reason(Some(&store), Id::new(8)).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn disabled_blacklist_never_blocks() {
        assert_eq!(blacklist_reason(None, Id::new(7)).await.unwrap(), None);
    }
}
