//! Response envelope and rendering.
//!
//! Every command answers with the same envelope: a `meta` block describing
//! how the answer was produced and a command-specific `data` block.

use serde::Serialize;
use serde_json::Value;

use pairdex_core::Origin;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Standard response envelope for machine-readable output.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub meta: EnvelopeMeta,
    pub data: Value,
}

/// Metadata attached to every envelope.
#[derive(Debug, Serialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: String,
    pub exchange: String,
    /// Which resolution tier answered; absent for commands that do not
    /// resolve the directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit: Option<bool>,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub fn render(envelope: &Envelope, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(envelope)?,
    }

    Ok(())
}

fn render_table(envelope: &Envelope) -> Result<(), CliError> {
    println!("request_id  : {}", envelope.meta.request_id);
    println!("generated_at: {}", envelope.meta.generated_at);
    println!("exchange    : {}", envelope.meta.exchange);
    if let Some(origin) = envelope.meta.origin {
        println!("origin      : {origin}");
    }
    if let Some(cache_hit) = envelope.meta.cache_hit {
        println!("cache_hit   : {cache_hit}");
    }
    println!("latency_ms  : {}", envelope.meta.latency_ms);

    if !envelope.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    let Value::Object(fields) = &envelope.data else {
        println!("data:");
        let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
        for line in pretty_data.lines() {
            println!("  {line}");
        }
        return Ok(());
    };

    for (name, value) in fields {
        match value {
            Value::Array(items) if items.iter().all(is_pair_record) => {
                render_pair_rows(name, items);
            }
            Value::String(text) => println!("{name}: {text}"),
            other => println!("{name}: {other}"),
        }
    }

    Ok(())
}

fn is_pair_record(value: &Value) -> bool {
    value.get("display").is_some_and(Value::is_string)
}

fn render_pair_rows(name: &str, items: &[Value]) {
    println!("{name}:");

    let width = items
        .iter()
        .filter_map(|item| Some(item.get("display")?.as_str()?.len()))
        .max()
        .unwrap_or(0);

    for item in items {
        let display = item.get("display").and_then(Value::as_str).unwrap_or("-");
        let symbol = item.get("symbol").and_then(Value::as_str).unwrap_or("-");
        let id = item.get("id").and_then(Value::as_str).unwrap_or("-");
        println!("  {display:<width$}  {symbol}  ({id})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_meta_fields_stay_off_the_wire() {
        let envelope = Envelope {
            meta: EnvelopeMeta {
                request_id: String::from("11111111-1111-1111-1111-111111111111"),
                generated_at: String::from("2024-01-01T00:00:00Z"),
                exchange: String::from("coinbase"),
                origin: None,
                cache_hit: None,
                latency_ms: 0,
                warnings: Vec::new(),
            },
            data: json!({}),
        };

        let raw = serde_json::to_string(&envelope).expect("serializable");

        assert!(!raw.contains("origin"));
        assert!(!raw.contains("cache_hit"));
        assert!(!raw.contains("warnings"));
    }

    #[test]
    fn resolution_meta_serializes_the_origin_name() {
        let envelope = Envelope {
            meta: EnvelopeMeta {
                request_id: String::from("11111111-1111-1111-1111-111111111111"),
                generated_at: String::from("2024-01-01T00:00:00Z"),
                exchange: String::from("kraken"),
                origin: Some(Origin::Snapshot),
                cache_hit: Some(false),
                latency_ms: 12,
                warnings: vec![String::from("snapshot tier failed: boom (fetch.io)")],
            },
            data: json!({"pair_count": 0, "pairs": []}),
        };

        let value = serde_json::to_value(&envelope).expect("serializable");

        assert_eq!(value["meta"]["origin"], "snapshot");
        assert_eq!(value["meta"]["cache_hit"], false);
    }
}
