use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use thiserror::Error;

use tally_core::AccessToken;

/// Network key the token and count entries are filed under.
pub const NETWORK_FACEBOOK: &str = "facebook";

/// Metadata field holding the Facebook share count for a post.
pub const FIELD_FACEBOOK_SHARES: &str = "_facebook_shares";

/// Metadata field holding the per-post total across all networks.
pub const FIELD_TOTAL_SHARES: &str = "_total_shares";

/// Per-network count fields that feed the total. Other networks' counts are
/// written by their own modules; the recount only reads them.
pub const NETWORK_COUNT_FIELDS: &[&str] = &[
    FIELD_FACEBOOK_SHARES,
    "_twitter_shares",
    "_pinterest_shares",
    "_linkedin_shares",
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store directory missing or not writable: {0}")]
    StoreDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt store entry: {0}")]
    Corrupt(String),
}

/// Access to the externally managed authentication token.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    async fn access_token(&self, network: &str) -> AccessToken;

    /// Record that the upstream API invalidated the token.
    async fn mark_expired(&self, network: &str);
}

/// Key/value post-metadata store, keyed by post id and field name.
#[async_trait::async_trait]
pub trait MetaStore: Send + Sync {
    async fn get(&self, post_id: u64, field: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, post_id: u64, field: &str, value: &str) -> Result<(), StoreError>;
    async fn delete(&self, post_id: u64, field: &str) -> Result<(), StoreError>;

    /// Overwrite a field as one observable step. Concurrent readers must
    /// never see the field missing between the delete and the set.
    async fn replace(&self, post_id: u64, field: &str, value: &str) -> Result<(), StoreError> {
        self.delete(post_id, field).await?;
        self.set(post_id, field, value).await
    }
}

/// Read a stored count. Absent fields read as `None`; a stored value that is
/// not a number reads as 0 rather than erroring.
pub async fn read_count(
    store: &dyn MetaStore,
    post_id: u64,
    field: &str,
) -> Result<Option<u64>, StoreError> {
    Ok(store
        .get(post_id, field)
        .await?
        .map(|value| value.trim().parse::<u64>().unwrap_or(0)))
}

/// In-memory token store for tests and embedding hosts without their own
/// token storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_token(network: &str, secret: &str) -> Self {
        let store = Self::default();
        store
            .tokens
            .lock()
            .expect("token store lock")
            .insert(network.to_string(), secret.to_string());
        store
    }
}

#[async_trait::async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self, network: &str) -> AccessToken {
        let tokens = self.tokens.lock().expect("token store lock");
        AccessToken::from_stored(tokens.get(network).map(String::as_str))
    }

    async fn mark_expired(&self, network: &str) {
        self.tokens
            .lock()
            .expect("token store lock")
            .insert(network.to_string(), tally_core::EXPIRED_SENTINEL.to_string());
    }
}

/// In-memory metadata store. `replace` swaps the value under a single lock,
/// so no reader observes a missing intermediate state.
#[derive(Debug, Default)]
pub struct MemoryMetaStore {
    entries: Mutex<HashMap<(u64, String), String>>,
}

impl MemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl MetaStore for MemoryMetaStore {
    async fn get(&self, post_id: u64, field: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("meta store lock");
        Ok(entries.get(&(post_id, field.to_string())).cloned())
    }

    async fn set(&self, post_id: u64, field: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("meta store lock")
            .insert((post_id, field.to_string()), value.to_string());
        Ok(())
    }

    async fn delete(&self, post_id: u64, field: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("meta store lock")
            .remove(&(post_id, field.to_string()));
        Ok(())
    }

    async fn replace(&self, post_id: u64, field: &str, value: &str) -> Result<(), StoreError> {
        // A map insert is already delete-then-set under one lock.
        self.set(post_id, field, value).await
    }
}
