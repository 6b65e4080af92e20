mod cache;
mod pairs;
mod search;
mod snapshot;

use std::sync::Arc;

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use pairdex_core::{
    DirectoryConfig, ExchangeId, FileStore, Origin, PairDirectory, ReqwestHttpClient, Resolution,
};

use crate::cli::{Cli, Command, ExchangeSelector};
use crate::error::CliError;
use crate::output::{Envelope, EnvelopeMeta};

#[derive(Debug)]
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub origin: Option<Origin>,
    pub cache_hit: Option<bool>,
    pub latency_ms: u64,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            origin: None,
            cache_hit: None,
            latency_ms: 0,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Fold a resolution report into the result: tier provenance plus one
    /// warning per failed tier.
    pub fn with_resolution(mut self, resolution: &Resolution) -> Self {
        self.origin = Some(resolution.origin);
        self.cache_hit = Some(resolution.cache_hit());
        self.latency_ms = resolution.latency_ms;

        for failure in &resolution.failures {
            self.warnings.push(format!(
                "{} tier failed: {} ({})",
                failure.tier,
                failure.error,
                failure.error.code()
            ));
        }

        if resolution.origin == Origin::None {
            self.warnings
                .push(String::from("all resolution tiers failed, directory is empty"));
        }

        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let exchange = to_exchange_id(cli.exchange);
    let config = DirectoryConfig {
        exchange,
        timeout_ms: cli.timeout_ms,
        refresh: cli.refresh,
        ..DirectoryConfig::default()
    };

    let command_result = match &cli.command {
        Command::Pairs => pairs::run(directory(&config)).await?,
        Command::Search(args) => search::run(args, directory(&config)).await?,
        Command::Snapshot(args) => snapshot::run(args, directory(&config)).await?,
        Command::Cache(args) => cache::run(args, &config)?,
    };

    let CommandResult {
        data,
        warnings,
        origin,
        cache_hit,
        latency_ms,
    } = command_result;

    let meta = EnvelopeMeta {
        request_id: Uuid::new_v4().to_string(),
        generated_at: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .expect("UTC timestamps are RFC3339 formattable"),
        exchange: exchange.as_str().to_owned(),
        origin,
        cache_hit,
        latency_ms,
        warnings,
    };

    Ok(Envelope { meta, data })
}

fn directory(config: &DirectoryConfig) -> PairDirectory {
    PairDirectory::new(
        config.clone(),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(FileStore::open_default()),
    )
}

fn to_exchange_id(selector: ExchangeSelector) -> ExchangeId {
    match selector {
        ExchangeSelector::Coinbase => ExchangeId::Coinbase,
        ExchangeSelector::Kraken => ExchangeId::Kraken,
    }
}
