//! Section 301 trade-action duty index
//!
//! The trade-action table keys additional duties on 6-digit HS prefixes
//! with the rate stored as a fraction (0.25 = 25%). The index normalizes
//! every stored code exactly once when it is built; queries are read-only
//! exact-match lookups against the finished map.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::info;

use super::normalize::{normalize_hts, trade_action_prefix};

/// Immutable index of Section 301 additional duties by 6-digit prefix
#[derive(Debug, Clone, Default)]
pub struct Sec301Index {
    rates: HashMap<String, Decimal>,
}

impl Sec301Index {
    /// Build the index from (code, fraction) rows in file order.
    ///
    /// Duplicate prefixes can occur across combined tranche lists; the
    /// first row in file order wins, matching the source table's
    /// precedence.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut rates: HashMap<String, Decimal> = HashMap::new();

        for (code, fraction) in rows {
            let normalized = normalize_hts(&code);
            let key = trade_action_prefix(&normalized).to_string();
            if key.is_empty() {
                continue;
            }
            rates.entry(key).or_insert(fraction);
        }

        info!(prefixes = rates.len(), "built Section 301 index");
        Sec301Index { rates }
    }

    /// Additional duty in percent for an exact 6-digit prefix match.
    ///
    /// Exact equality, not prefix scan: a 4-digit query never matches a
    /// 6-digit key. No match is 0%.
    pub fn rate_percent(&self, prefix: &str) -> Decimal {
        self.rates
            .get(prefix)
            .map(|fraction| *fraction * Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
