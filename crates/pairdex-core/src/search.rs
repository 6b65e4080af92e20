//! Ranked free-text search over a resolved pair list.

use std::cmp::Ordering;

use crate::domain::PairRecord;

/// Hard cap on returned matches.
pub const MAX_RESULTS: usize = 50;

/// Ordering on display names that reads like a dictionary rather than a
/// byte table: compare the lowercased forms first so `aave/USD` sorts before
/// `BTC/USD`, with the raw comparison as a deterministic tie-break.
pub fn display_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Rank `pairs` against a free-text `query`.
///
/// Pure function of its inputs; the directory is not consulted and `pairs`
/// is left untouched. A blank query returns nothing rather than the whole
/// list. Matching is a case-insensitive substring test against the display
/// name and the base-asset id; matches are ordered exact-base first, then
/// prefix matches, then alphabetically by display name, and capped at
/// [`MAX_RESULTS`].
pub fn search(query: &str, pairs: &[PairRecord]) -> Vec<PairRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Ranked> = pairs
        .iter()
        .filter_map(|pair| Ranked::evaluate(pair, &query))
        .collect();

    matches.sort_by(|a, b| {
        b.exact_base
            .cmp(&a.exact_base)
            .then_with(|| b.prefixed.cmp(&a.prefixed))
            .then_with(|| display_cmp(&a.pair.display, &b.pair.display))
    });

    matches.truncate(MAX_RESULTS);
    matches.into_iter().map(|ranked| ranked.pair).collect()
}

/// One matching record plus its precomputed rank signals.
struct Ranked {
    pair: PairRecord,
    exact_base: bool,
    prefixed: bool,
}

impl Ranked {
    fn evaluate(pair: &PairRecord, query: &str) -> Option<Self> {
        let display = pair.display.to_lowercase();
        let id = pair.id.to_lowercase();

        if !display.contains(query) && !id.contains(query) {
            return None;
        }

        Some(Self {
            exact_base: pair.base().to_lowercase() == query,
            prefixed: display.starts_with(query) || id.starts_with(query),
            pair: pair.clone(),
        })
    }
}
