//! CLI argument definitions for pairdex.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pairs` | Resolve and print the full pair directory |
//! | `search` | Search the directory for matching pairs |
//! | `snapshot` | Generate the local snapshot manifest from a live listing |
//! | `cache` | Inspect or clear the resolved-pairs cache |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--exchange` | `coinbase` | Exchange whose listing backs the directory |
//! | `--refresh` | `false` | Skip the cache read, keep the write-back |
//! | `--timeout-ms` | `10000` | Request timeout in ms |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Crypto trading-pair directory and search.
///
/// Resolves the tradable USD pair list from a local cache, a pre-generated
/// snapshot manifest, or the exchange's public listing endpoint, in that
/// order, and searches it by display name or base-asset code.
#[derive(Debug, Parser)]
#[command(name = "pairdex", version, about = "Crypto trading-pair directory and search")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Exchange whose listing backs the directory.
    #[arg(long, global = true, value_enum, default_value_t = ExchangeSelector::Coinbase)]
    pub exchange: ExchangeSelector,

    /// Skip the cache read; the resolved list still replaces the cached one.
    #[arg(long, global = true, default_value_t = false)]
    pub refresh: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object.
    Json,
    /// Plain text table for terminal reading.
    Table,
}

/// Exchange selection flag; mirrors `pairdex_core::ExchangeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExchangeSelector {
    /// Coinbase Exchange `/products` (flat list shape).
    Coinbase,
    /// Kraken `AssetPairs` (keyed map shape).
    Kraken,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve and print the full pair directory.
    Pairs,

    /// Search the directory for pairs matching a query.
    Search(SearchArgs),

    /// Generate the local snapshot manifest from a live exchange listing.
    Snapshot(SnapshotArgs),

    /// Inspect or clear the resolved-pairs cache.
    Cache(CacheArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form query matched against display names and base-asset codes.
    pub query: String,

    /// Trim displayed results below the ranking cap of 50.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Output path for the generated manifest.
    ///
    /// Defaults to `<home>/tokens.json`, where the directory looks for it.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

/// Cache maintenance subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Show the cached list's size, age, and freshness.
    Show,
    /// Delete the cached list under the current version tag.
    Clear,
}
