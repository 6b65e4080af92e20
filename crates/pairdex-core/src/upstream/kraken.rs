use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::PairRecord;
use crate::error::FetchError;

/// Kraken `AssetPairs` envelope: a top-level error list plus a result map
/// keyed by the exchange's internal pair name. The map keys are not used;
/// each entry carries its own identifiers.
#[derive(Debug, Deserialize)]
struct AssetPairsResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: BTreeMap<String, AssetPair>,
}

#[derive(Debug, Deserialize)]
struct AssetPair {
    #[serde(default)]
    altname: String,
    #[serde(default)]
    wsname: Option<String>,
    #[serde(default)]
    base: String,
}

impl AssetPair {
    /// Prefer the websocket name (`BASE/QUOTE` form) over the terse altname.
    fn preferred_name(&self) -> Option<&str> {
        self.wsname
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| Some(self.altname.as_str()).filter(|name| !name.trim().is_empty()))
    }
}

/// Normalize the keyed map shape.
///
/// A non-empty error list fails the whole fetch even when `result` carries
/// data; per-entry problems only drop that entry.
pub(super) fn normalize(body: &str) -> Result<Vec<PairRecord>, FetchError> {
    let response: AssetPairsResponse = serde_json::from_str(body)?;

    if !response.error.is_empty() {
        return Err(FetchError::Upstream(response.error));
    }

    Ok(response
        .result
        .into_values()
        .filter_map(|pair| {
            let Some(name) = pair.preferred_name() else {
                log::debug!("dropping pair without a usable name (base '{}')", pair.base);
                return None;
            };

            PairRecord::new(pair.base.clone(), name, name).ok()
        })
        .collect())
}
