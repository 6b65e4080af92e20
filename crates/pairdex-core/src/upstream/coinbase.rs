use serde::Deserialize;

use crate::domain::PairRecord;
use crate::error::FetchError;

/// One entry of the Coinbase Exchange `/products` listing. The endpoint
/// returns many more fields; only the ones the filter and mapping read are
/// kept, and unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct Product {
    id: String,
    base_currency: String,
    quote_currency: String,
    display_name: String,
    status: String,
    #[serde(default)]
    trading_disabled: bool,
}

impl Product {
    fn is_tradable_usd(&self) -> bool {
        self.quote_currency == "USD" && self.status == "online" && !self.trading_disabled
    }
}

/// Normalize the flat product list: keep online, trading-enabled USD quotes.
///
/// Entries that fail record validation are dropped individually so one bad
/// product cannot poison the whole listing.
pub(super) fn normalize(body: &str) -> Result<Vec<PairRecord>, FetchError> {
    let products: Vec<Product> = serde_json::from_str(body)?;

    Ok(products
        .into_iter()
        .filter(Product::is_tradable_usd)
        .filter_map(|product| {
            match PairRecord::new(product.base_currency, product.id, product.display_name) {
                Ok(pair) => Some(pair),
                Err(error) => {
                    log::debug!("dropping malformed product: {error}");
                    None
                }
            }
        })
        .collect())
}
