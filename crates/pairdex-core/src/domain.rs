use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Canonical tradable pair: one base asset quoted against USD.
///
/// Every upstream listing is normalized into this shape, and it is the exact
/// layout persisted to the cache store and the snapshot manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRecord {
    /// Exchange short code for the base asset, e.g. `BTC` or `XXBT`.
    pub id: String,
    /// Exchange compound identifier for the pair, e.g. `BTC-USD` or `XBT/USD`.
    pub symbol: String,
    /// Human-readable `BASE/QUOTE` name; the sort and search key of record.
    pub display: String,
}

impl PairRecord {
    /// Build a record, rejecting blank display names.
    ///
    /// `display` is the one field every consumer renders and sorts on, so it
    /// must carry text; `id` and `symbol` are passed through as the exchange
    /// reported them.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        display: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let display = display.into();
        if display.trim().is_empty() {
            return Err(ValidationError::EmptyDisplay);
        }

        Ok(Self {
            id: id.into(),
            symbol: symbol.into(),
            display,
        })
    }

    /// The base-asset component of `id`: everything before the first `-` or
    /// `/`, or the whole `id` when it carries no separator.
    pub fn base(&self) -> &str {
        match self.id.split_once(['-', '/']) {
            Some((base, _)) => base,
            None => &self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_display_names() {
        assert_eq!(
            PairRecord::new("BTC", "BTC-USD", "   "),
            Err(ValidationError::EmptyDisplay)
        );
        assert_eq!(
            PairRecord::new("BTC", "BTC-USD", ""),
            Err(ValidationError::EmptyDisplay)
        );
    }

    #[test]
    fn base_stops_at_first_separator() {
        let dashed = PairRecord::new("SOL-USD", "SOL-USD", "SOL/USD").expect("valid");
        assert_eq!(dashed.base(), "SOL");

        let slashed = PairRecord::new("XBT/USD", "XBT/USD", "XBT/USD").expect("valid");
        assert_eq!(slashed.base(), "XBT");
    }

    #[test]
    fn base_is_whole_id_without_separator() {
        let record = PairRecord::new("BTC", "BTC-USD", "BTC/USD").expect("valid");
        assert_eq!(record.base(), "BTC");
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let record = PairRecord::new("ETH", "ETH-USD", "ETH/USD").expect("valid");
        let json = serde_json::to_value(&record).expect("serializable");

        assert_eq!(json["id"], "ETH");
        assert_eq!(json["symbol"], "ETH-USD");
        assert_eq!(json["display"], "ETH/USD");
    }
}
