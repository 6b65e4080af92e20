//! Upstream exchange listings and their normalization into [`PairRecord`]s.
//!
//! Two response shapes exist in the wild and a directory is configured with
//! exactly one of them; the shapes are never probed or merged. Both
//! normalizers return records sorted by display name, so every tier hands
//! the same ordering to callers and to the cache.

mod coinbase;
mod kraken;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::PairRecord;
use crate::error::{FetchError, ValidationError};
use crate::search::display_cmp;

/// Exchanges whose pair listings this crate can normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Coinbase,
    Kraken,
}

impl ExchangeId {
    pub const ALL: [Self; 2] = [Self::Coinbase, Self::Kraken];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coinbase => "coinbase",
            Self::Kraken => "kraken",
        }
    }

    /// Public listing endpoint for this exchange. No credentials required.
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Coinbase => "https://api.exchange.coinbase.com/products",
            Self::Kraken => "https://api.kraken.com/0/public/AssetPairs",
        }
    }

    /// Parse a raw listing body into normalized, display-sorted records.
    pub fn normalize(self, body: &str) -> Result<Vec<PairRecord>, FetchError> {
        let mut pairs = match self {
            Self::Coinbase => coinbase::normalize(body)?,
            Self::Kraken => kraken::normalize(body)?,
        };

        pairs.sort_by(|a, b| display_cmp(&a.display, &b.display));
        Ok(pairs)
    }
}

impl Display for ExchangeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "coinbase" => Ok(Self::Coinbase),
            "kraken" => Ok(Self::Kraken),
            other => Err(ValidationError::InvalidExchange {
                value: other.to_owned(),
            }),
        }
    }
}
