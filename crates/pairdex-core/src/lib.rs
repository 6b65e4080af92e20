//! Core contracts for pairdex.
//!
//! This crate contains:
//! - The canonical pair record and its validation
//! - The key-value cache store with file and in-memory backends
//! - The HTTP transport seam used by resolution
//! - Upstream exchange shapes and their normalizers
//! - Three-tier directory resolution (cache, snapshot, remote)
//! - Ranked free-text search

pub mod cache;
pub mod directory;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod search;
pub mod upstream;

pub use cache::{resolve_pairdex_home, CacheKeys, FileStore, KeyValueStore, MemoryStore};
pub use directory::{
    DirectoryConfig, Origin, PairDirectory, Resolution, SnapshotSource, TierFailure,
    CACHE_VERSION, DEFAULT_CACHE_TTL,
};
pub use domain::PairRecord;
pub use error::{FetchError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use search::{display_cmp, search, MAX_RESULTS};
pub use upstream::ExchangeId;
