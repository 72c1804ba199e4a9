//! Policy configuration
//!
//! Trade policy moves faster than releases: the reciprocal tariff rate,
//! the country list it applies to, and the MPF/HMF constants are all
//! external configuration with compiled-in defaults matching the values
//! published at the time of writing. A partial TOML file overrides only
//! the fields it names.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Full policy: reciprocal tariff, trade-action note, fee constants
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Policy {
    #[serde(default)]
    pub reciprocal: ReciprocalPolicy,
    #[serde(default)]
    pub trade_action: TradeActionPolicy,
    #[serde(default)]
    pub fees: FeeSchedule,
}

impl Policy {
    /// Load policy from a TOML file, falling back to defaults per field.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Policy> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read policy file {:?}", path))?;
        let policy: Policy =
            toml::from_str(&contents).with_context(|| format!("invalid policy file {:?}", path))?;
        info!(?path, "loaded policy overrides");
        Ok(policy)
    }
}

/// Flat surcharge applied by country of origin
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReciprocalPolicy {
    /// Surcharge in percent
    pub rate: Decimal,
    /// Origin countries the surcharge applies to
    pub countries: Vec<String>,
}

impl Default for ReciprocalPolicy {
    fn default() -> Self {
        ReciprocalPolicy {
            rate: Decimal::from(145),
            countries: vec!["China".to_string()],
        }
    }
}

impl ReciprocalPolicy {
    /// Surcharge in percent for the given origin, zero when the origin is
    /// absent or not flagged. Comparison is case-insensitive.
    pub fn percent_for(&self, origin: Option<&str>) -> Decimal {
        let Some(origin) = origin else {
            return Decimal::ZERO;
        };
        let flagged = self
            .countries
            .iter()
            .any(|country| country.eq_ignore_ascii_case(origin.trim()));
        if flagged {
            self.rate
        } else {
            Decimal::ZERO
        }
    }
}

/// Informational default for Section 301 coverage shown in help output.
/// The authoritative rates come from the trade-action table itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TradeActionPolicy {
    pub default_rate: Decimal,
}

impl Default for TradeActionPolicy {
    fn default() -> Self {
        TradeActionPolicy {
            default_rate: Decimal::from(25),
        }
    }
}

/// MPF/HMF constants, 19 CFR 24.23 and 24.24 values as of writing
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// Flat MPF for entries at or under the threshold
    pub mpf_flat: Decimal,
    /// Entered-value threshold for the flat fee, inclusive
    pub mpf_threshold: Decimal,
    /// Ad-valorem MPF rate above the threshold
    pub mpf_rate: Decimal,
    /// Formal-entry MPF floor
    pub mpf_min: Decimal,
    /// Formal-entry MPF cap
    pub mpf_max: Decimal,
    /// Harbor Maintenance Fee rate, ocean transport only
    pub hmf_rate: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            mpf_flat: Decimal::new(262, 2),
            mpf_threshold: Decimal::from(2500),
            mpf_rate: Decimal::new(3464, 6),
            mpf_min: Decimal::new(3271, 2),
            mpf_max: Decimal::new(63462, 2),
            hmf_rate: Decimal::new(125, 5),
        }
    }
}
