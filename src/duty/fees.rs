//! Merchandise Processing Fee and Harbor Maintenance Fee
//!
//! Both fees are ad-valorem formulas with flat floors and caps mandated
//! by regulation. The constants live in [`FeeSchedule`](crate::config::FeeSchedule),
//! with defaults matching the current published values.

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::FeeSchedule;

/// Method of transportation for the shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Air,
    Ocean,
}

/// Merchandise Processing Fee on the total entered value.
///
/// Informal entries (value at or under the threshold) pay the flat fee;
/// formal entries pay value x rate clamped to the [min, max] band. The
/// threshold boundary is inclusive: exactly 2500 pays the flat fee.
pub fn calculate_mpf(total_value: Decimal, fees: &FeeSchedule) -> Decimal {
    if total_value <= fees.mpf_threshold {
        return fees.mpf_flat;
    }
    (total_value * fees.mpf_rate).clamp(fees.mpf_min, fees.mpf_max)
}

/// Harbor Maintenance Fee: ad-valorem on ocean shipments only.
pub fn calculate_hmf(total_value: Decimal, transport: Transport, fees: &FeeSchedule) -> Decimal {
    match transport {
        Transport::Ocean => total_value * fees.hmf_rate,
        Transport::Air => Decimal::ZERO,
    }
}
