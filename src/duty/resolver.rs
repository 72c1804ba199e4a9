//! Duty resolution and aggregation
//!
//! One resolver owns the two loaded reference tables plus the policy
//! configuration. Every query is a pure function of its inputs and the
//! tables: no state is written between calls, so repeated identical
//! queries always produce identical breakdowns.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::base_rate::BaseRate;
use super::fees::{calculate_hmf, calculate_mpf, Transport};
use super::normalize::{normalize_hts, trade_action_prefix};
use super::schedule::Schedule;
use super::trade_action::Sec301Index;
use crate::config::Policy;
use crate::error::{Result, TariffError};

/// Upper bound on line items per quote, from the original entry form
pub const MAX_QUOTE_LINES: usize = 10;

/// Duty breakdown for a single HTS code
#[derive(Debug, Clone, Serialize)]
pub struct DutyBreakdown {
    /// Matched schedule code in display form
    pub hts_number: String,
    pub description: String,
    /// Numeric base duty contribution in percent
    pub base_rate: Decimal,
    /// Base duty as displayed: "5.3%", "Free", or the literal rate text
    pub base_rate_display: String,
    /// Schedule-level "Additional Duties" text, shown but never summed;
    /// the Section 301 table is the authoritative trade-action source
    pub additional_duties: Option<String>,
    pub section_301_rate: Decimal,
    pub reciprocal_rate: Decimal,
    /// base + Section 301 + reciprocal, in percent
    pub total_rate: Decimal,
    /// True when the base rate is unit-based or unparseable and its zero
    /// contribution under-counts the real duty
    pub approximate: bool,
    pub line_value: Option<Decimal>,
    pub duty_amount: Option<Decimal>,
}

impl DutyBreakdown {
    /// Attach a line value and compute the monetary duty for it.
    pub fn with_line_value(mut self, value: Decimal) -> Self {
        self.duty_amount = Some(self.total_rate / Decimal::ONE_HUNDRED * value);
        self.line_value = Some(value);
        self
    }
}

/// One line item of a quote request
#[derive(Debug, Clone)]
pub struct QuoteLine {
    pub code: String,
    /// Explicit entered value; absent lines take an even share of the
    /// request's shipment value
    pub value: Option<Decimal>,
    /// Per-line origin override
    pub origin: Option<String>,
}

impl QuoteLine {
    pub fn new(code: impl Into<String>) -> Self {
        QuoteLine {
            code: code.into(),
            value: None,
            origin: None,
        }
    }
}

/// Multi-line quote request
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub lines: Vec<QuoteLine>,
    /// Total shipment value allocated evenly across lines without an
    /// explicit value
    pub shipment_value: Option<Decimal>,
    /// Default origin for lines without one
    pub origin: Option<String>,
    /// When set, MPF/HMF are computed on the total entered value
    pub transport: Option<Transport>,
}

impl QuoteRequest {
    fn validate(&self) -> Result<()> {
        if self.lines.is_empty() {
            return Err(TariffError::Validation("quote needs at least one HTS code".into()).into());
        }
        if self.lines.len() > MAX_QUOTE_LINES {
            return Err(TariffError::Validation(format!(
                "quote supports at most {} HTS codes, got {}",
                MAX_QUOTE_LINES,
                self.lines.len()
            ))
            .into());
        }
        if let Some(total) = self.shipment_value {
            if total < Decimal::ZERO {
                return Err(
                    TariffError::Validation("shipment value must be non-negative".into()).into(),
                );
            }
        }
        for line in &self.lines {
            if let Some(value) = line.value {
                if value < Decimal::ZERO {
                    return Err(TariffError::Validation(format!(
                        "value for {} must be non-negative",
                        line.code
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Aggregate result of a multi-line quote
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub lines: Vec<DutyBreakdown>,
    /// Codes that matched no schedule entry; excluded from every total
    pub not_found: Vec<String>,
    /// Sum of entered values across all requested lines
    pub entered_value: Decimal,
    /// Combined monetary duty over the resolved lines
    pub total_duty_amount: Decimal,
    pub mpf: Option<Decimal>,
    pub hmf: Option<Decimal>,
    /// Duty plus fees
    pub grand_total: Decimal,
    /// True when any resolved line carries an approximate base rate
    pub approximate: bool,
}

/// Stateless duty resolver over immutable reference tables
#[derive(Debug, Clone)]
pub struct DutyResolver {
    schedule: Schedule,
    sec301: Sec301Index,
    policy: Policy,
}

impl DutyResolver {
    pub fn new(schedule: Schedule, sec301: Sec301Index, policy: Policy) -> Self {
        DutyResolver {
            schedule,
            sec301,
            policy,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Resolve a single code to its duty breakdown.
    ///
    /// `None` means the code matched no schedule entry. Callers report it
    /// as a warning and move on; it is never a fatal condition.
    pub fn resolve(&self, raw_code: &str, origin: Option<&str>) -> Option<DutyBreakdown> {
        let normalized = normalize_hts(raw_code);
        let entry = self.schedule.find_prefix(&normalized)?;

        let base = BaseRate::parse(entry.general_rate.as_deref());
        let section_301_rate = self.sec301.rate_percent(trade_action_prefix(&normalized));
        let reciprocal_rate = self.policy.reciprocal.percent_for(origin);
        let total_rate = base.percent() + section_301_rate + reciprocal_rate;

        debug!(
            code = raw_code,
            matched = %entry.hts_number,
            %total_rate,
            "resolved duty"
        );

        Some(DutyBreakdown {
            hts_number: entry.hts_number.clone(),
            description: entry.description.clone(),
            base_rate: base.percent(),
            base_rate_display: base.display(),
            additional_duties: entry.additional_duties.clone(),
            section_301_rate,
            reciprocal_rate,
            total_rate,
            approximate: base.is_approximate(),
            line_value: None,
            duty_amount: None,
        })
    }

    /// Quote duties for up to [`MAX_QUOTE_LINES`] line items.
    ///
    /// Lines whose code is not found are skipped and listed in
    /// `not_found`; their entered value still counts toward the fee base,
    /// as on the original entry form. The even share divides the shipment
    /// value by the number of requested lines, found or not.
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        request.validate()?;

        let even_share = request
            .shipment_value
            .map(|total| total / Decimal::from(request.lines.len()));

        let mut lines = Vec::new();
        let mut not_found = Vec::new();
        let mut entered_value = Decimal::ZERO;
        let mut total_duty_amount = Decimal::ZERO;

        for line in &request.lines {
            let line_value = line.value.or(even_share);
            if let Some(value) = line.value {
                entered_value += value;
            }

            let origin = line.origin.as_deref().or(request.origin.as_deref());
            let Some(breakdown) = self.resolve(&line.code, origin) else {
                warn!(code = %line.code, "HTS code not found, skipping line");
                not_found.push(line.code.clone());
                continue;
            };

            let breakdown = match line_value {
                Some(value) => breakdown.with_line_value(value),
                None => breakdown,
            };
            if let Some(amount) = breakdown.duty_amount {
                total_duty_amount += amount;
            }
            lines.push(breakdown);
        }

        // explicit per-line values define the fee base; an even-allocation
        // request's base is the shipment value itself
        if entered_value == Decimal::ZERO {
            entered_value = request.shipment_value.unwrap_or(Decimal::ZERO);
        }

        let (mpf, hmf) = match request.transport {
            Some(transport) => (
                Some(calculate_mpf(entered_value, &self.policy.fees)),
                Some(calculate_hmf(entered_value, transport, &self.policy.fees)),
            ),
            None => (None, None),
        };

        let grand_total = total_duty_amount
            + mpf.unwrap_or(Decimal::ZERO)
            + hmf.unwrap_or(Decimal::ZERO);
        let approximate = lines.iter().any(|line| line.approximate);

        Ok(Quote {
            lines,
            not_found,
            entered_value,
            total_duty_amount,
            mpf,
            hmf,
            grand_total,
            approximate,
        })
    }
}
