//! Sharetally engine: IO ports and adapter orchestration.
mod adapter;
mod fetch;
mod persist;
mod store;

pub use adapter::{ReconcileOutcome, RefreshOutcome, ShareCountAdapter, SubmissionResponse};
pub use fetch::{CountFetcher, FetchError, GraphFetcher, GraphSettings};
pub use persist::{ensure_store_dir, FileMetaStore};
pub use store::{
    read_count, MemoryMetaStore, MemoryTokenStore, MetaStore, StoreError, TokenStore,
    FIELD_FACEBOOK_SHARES, FIELD_TOTAL_SHARES, NETWORK_COUNT_FIELDS, NETWORK_FACEBOOK,
};
