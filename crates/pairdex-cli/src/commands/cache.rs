use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;

use pairdex_core::{CacheKeys, DirectoryConfig, FileStore, KeyValueStore, PairRecord};

use crate::cli::{CacheArgs, CacheCommand};
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &CacheArgs, config: &DirectoryConfig) -> Result<CommandResult, CliError> {
    let store = FileStore::open_default();
    let keys = CacheKeys::for_version(&config.cache_version);

    match args.command {
        CacheCommand::Show => Ok(show(&store, &keys, config)),
        CacheCommand::Clear => Ok(clear(&store, &keys, config)),
    }
}

fn show(store: &FileStore, keys: &CacheKeys, config: &DirectoryConfig) -> CommandResult {
    let raw_pairs = store.get(&keys.pairs);
    let stored_ms = store
        .get(&keys.timestamp)
        .and_then(|raw| raw.parse::<u64>().ok());

    let (Some(raw_pairs), Some(stored_ms)) = (raw_pairs, stored_ms) else {
        let data = json!({
            "version": config.cache_version,
            "store_path": store.path().display().to_string(),
            "cached": false,
        });
        return CommandResult::ok(data);
    };

    let pair_count = serde_json::from_str::<Vec<PairRecord>>(&raw_pairs)
        .map(|pairs| pairs.len())
        .ok();

    let age_ms = now_ms().saturating_sub(stored_ms);
    let fresh = age_ms < config.cache_ttl.as_millis() as u64;

    let data = json!({
        "version": config.cache_version,
        "store_path": store.path().display().to_string(),
        "cached": true,
        "pair_count": pair_count,
        "stored_at_ms": stored_ms,
        "age_ms": age_ms,
        "fresh": fresh,
    });

    let result = CommandResult::ok(data);
    if pair_count.is_none() {
        return result.with_warning("cached payload is corrupt and will be refetched");
    }

    result
}

fn clear(store: &FileStore, keys: &CacheKeys, config: &DirectoryConfig) -> CommandResult {
    let existed = store.get(&keys.pairs).is_some() || store.get(&keys.timestamp).is_some();
    store.remove(&keys.pairs);
    store.remove(&keys.timestamp);

    let data = json!({
        "version": config.cache_version,
        "cleared": existed,
    });

    CommandResult::ok(data)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
