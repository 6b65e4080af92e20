use std::fs;
use std::time::Instant;

use serde_json::json;

use pairdex_core::{resolve_pairdex_home, PairDirectory};

use crate::cli::SnapshotArgs;
use crate::error::CliError;

use super::CommandResult;

/// Fetch the live listing and write it as the snapshot manifest.
///
/// Always goes to the remote tier; the point of the manifest is to be newer
/// than whatever the cache holds. Unlike `pairs`, an upstream failure here
/// is a hard error: a stale manifest must not be silently left in place
/// looking fresh.
pub async fn run(args: &SnapshotArgs, directory: PairDirectory) -> Result<CommandResult, CliError> {
    let started = Instant::now();
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| resolve_pairdex_home().join("tokens.json"));

    let pairs = directory.fetch_remote().await?;

    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out, serde_json::to_string_pretty(&pairs)?)?;

    let data = json!({
        "path": out.display().to_string(),
        "pair_count": pairs.len(),
    });

    let latency_ms = started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;
    Ok(CommandResult::ok(data).with_latency(latency_ms))
}
