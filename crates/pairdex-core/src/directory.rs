//! Three-tier pair-list resolution: cache, local snapshot, remote exchange.
//!
//! Tiers are tried in that fixed order and the first success wins. Snapshot
//! and remote successes are written back to the cache store; failures are
//! logged and collected, never surfaced as errors. Exhausting every tier
//! yields an empty directory.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cache::{resolve_pairdex_home, CacheKeys, KeyValueStore};
use crate::domain::PairRecord;
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::upstream::ExchangeId;

/// Current cache generation. Bump whenever the record shape or the backing
/// exchange changes; entries under older tags become unreachable and age
/// out on their own.
pub const CACHE_VERSION: &str = "v3";

/// Freshness window for cached pair lists.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Where the pre-generated snapshot manifest lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// Read from local disk, the generator's default output location.
    File(PathBuf),
    /// Fetch over HTTP, for hosts serving the manifest next to the app.
    Http(String),
}

/// Tunables for one directory instance.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Which upstream shape the remote tier talks to.
    pub exchange: ExchangeId,
    /// How long a cached list stays fresh.
    pub cache_ttl: Duration,
    /// Version tag prefixed to both cache keys.
    pub cache_version: String,
    pub snapshot: SnapshotSource,
    /// Per-request budget for the snapshot and remote tiers.
    pub timeout_ms: u64,
    /// Skip the cache read; the write-back after a fetch still happens.
    pub refresh: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            exchange: ExchangeId::Coinbase,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_version: String::from(CACHE_VERSION),
            snapshot: SnapshotSource::File(resolve_pairdex_home().join("tokens.json")),
            timeout_ms: 10_000,
            refresh: false,
        }
    }
}

/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cache,
    Snapshot,
    Remote,
    /// Every tier failed; the resolved list is empty.
    None,
}

impl Origin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Snapshot => "snapshot",
            Self::Remote => "remote",
            Self::None => "none",
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier that was attempted and failed.
#[derive(Debug)]
pub struct TierFailure {
    pub tier: Origin,
    pub error: FetchError,
}

impl TierFailure {
    fn new(tier: Origin, error: FetchError) -> Self {
        Self { tier, error }
    }
}

/// Outcome of one full resolution pass.
#[derive(Debug)]
pub struct Resolution {
    pub pairs: Vec<PairRecord>,
    pub origin: Origin,
    pub failures: Vec<TierFailure>,
    pub latency_ms: u64,
}

impl Resolution {
    fn finish(
        pairs: Vec<PairRecord>,
        origin: Origin,
        failures: Vec<TierFailure>,
        started: Instant,
    ) -> Self {
        Self {
            pairs,
            origin,
            failures,
            latency_ms: elapsed_ms(started),
        }
    }

    /// True when the cache tier answered without touching snapshot or remote.
    pub fn cache_hit(&self) -> bool {
        self.origin == Origin::Cache
    }
}

/// Resolves the canonical tradable pair list.
///
/// Both collaborators are injected: the transport so resolution can be
/// tested without network access, and the store so cache behavior can be
/// observed directly.
pub struct PairDirectory {
    config: DirectoryConfig,
    keys: CacheKeys,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn KeyValueStore>,
}

impl PairDirectory {
    pub fn new(
        config: DirectoryConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let keys = CacheKeys::for_version(&config.cache_version);
        Self {
            config,
            keys,
            http,
            store,
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Resolve the pair list. Never fails: tier failures are logged and an
    /// empty list is the worst case.
    pub async fn resolve(&self) -> Vec<PairRecord> {
        self.resolve_detailed().await.pairs
    }

    /// Resolve with a full report of which tier answered and what failed
    /// along the way.
    pub async fn resolve_detailed(&self) -> Resolution {
        let started = Instant::now();
        let mut failures = Vec::new();

        if self.config.refresh {
            log::debug!("cache read skipped, refresh requested");
        } else if let Some(pairs) = self.cached_pairs(&mut failures) {
            log::debug!("cache hit under tag '{}'", self.config.cache_version);
            return Resolution::finish(pairs, Origin::Cache, failures, started);
        }

        match self.fetch_snapshot().await {
            Ok(pairs) => {
                self.store_pairs(&pairs);
                return Resolution::finish(pairs, Origin::Snapshot, failures, started);
            }
            Err(error) => {
                log::warn!(
                    "snapshot unavailable, falling back to {}: {error}",
                    self.config.exchange
                );
                failures.push(TierFailure::new(Origin::Snapshot, error));
            }
        }

        match self.fetch_remote().await {
            Ok(pairs) => {
                self.store_pairs(&pairs);
                return Resolution::finish(pairs, Origin::Remote, failures, started);
            }
            Err(error) => {
                log::error!("{} listing failed: {error}", self.config.exchange);
                failures.push(TierFailure::new(Origin::Remote, error));
            }
        }

        log::error!("all resolution tiers failed, directory is empty");
        Resolution::finish(Vec::new(), Origin::None, failures, started)
    }

    /// Remote tier on its own: fetch the configured exchange's listing and
    /// normalize it. The cache is not consulted and not written; this is the
    /// path the snapshot generator uses.
    pub async fn fetch_remote(&self) -> Result<Vec<PairRecord>, FetchError> {
        let body = self.fetch_body(self.config.exchange.endpoint()).await?;
        self.config.exchange.normalize(&body)
    }

    /// Cache tier: both keys present under the version tag, timestamp fresh,
    /// payload decodable. Misses are the expected cold path; only a corrupt
    /// payload counts as a failure.
    fn cached_pairs(&self, failures: &mut Vec<TierFailure>) -> Option<Vec<PairRecord>> {
        let raw_pairs = self.store.get(&self.keys.pairs)?;
        let raw_timestamp = self.store.get(&self.keys.timestamp)?;

        let stored_ms = match raw_timestamp.parse::<u64>() {
            Ok(value) => value,
            Err(error) => {
                log::debug!("cache timestamp unreadable, treating as miss: {error}");
                return None;
            }
        };

        let age_ms = now_ms().saturating_sub(stored_ms);
        if age_ms >= self.config.cache_ttl.as_millis() as u64 {
            log::debug!("cache entry expired, {age_ms}ms old");
            return None;
        }

        match serde_json::from_str(&raw_pairs) {
            Ok(pairs) => Some(pairs),
            Err(error) => {
                log::warn!(
                    "cached pair list under tag '{}' is corrupt: {error}",
                    self.config.cache_version
                );
                failures.push(TierFailure::new(Origin::Cache, FetchError::Malformed(error)));
                None
            }
        }
    }

    /// Snapshot tier: a pre-generated manifest of already-normalized,
    /// already-sorted records. Blank display names are dropped on load.
    async fn fetch_snapshot(&self) -> Result<Vec<PairRecord>, FetchError> {
        let body = match &self.config.snapshot {
            SnapshotSource::File(path) => std::fs::read_to_string(path)?,
            SnapshotSource::Http(url) => self.fetch_body(url).await?,
        };

        let mut pairs: Vec<PairRecord> = serde_json::from_str(&body)?;
        pairs.retain(|pair| !pair.display.trim().is_empty());
        Ok(pairs)
    }

    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        Ok(response.body)
    }

    /// Write-back after a successful fetch: the serialized list plus the
    /// current wall-clock time in ms-since-epoch text, both version-tagged.
    /// An empty list is still a successful fetch and is cached as such.
    fn store_pairs(&self, pairs: &[PairRecord]) {
        match serde_json::to_string(pairs) {
            Ok(payload) => {
                self.store.set(&self.keys.pairs, &payload);
                self.store.set(&self.keys.timestamp, &now_ms().to_string());
            }
            Err(error) => log::warn!("pair list not cached: {error}"),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
