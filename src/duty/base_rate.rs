//! General rate of duty parsing
//!
//! The "General Rate of Duty" column is free text: "Free", "5.3%",
//! "$0.02/kg", or blank. Parsing classifies the text into a tagged
//! outcome instead of collapsing everything into one number, so callers
//! can tell an exact percentage from a unit-based rate that contributes
//! zero and must be flagged as an approximation.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parsed base duty rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseRate {
    /// Ad-valorem percentage, e.g. "5.3%"
    Percent(Decimal),
    /// Duty-free entry
    Free,
    /// Unit-based or unparseable rate, kept verbatim. Numeric
    /// contribution is zero; the breakdown is marked approximate.
    Literal(String),
}

impl BaseRate {
    /// Classify a raw "General Rate of Duty" field.
    ///
    /// Missing or blank fields are a 0% rate. A field containing '%' is
    /// parsed numerically, falling back to the trimmed literal when the
    /// numeric portion does not parse.
    pub fn parse(raw: Option<&str>) -> Self {
        let trimmed = match raw {
            Some(s) => s.trim(),
            None => return BaseRate::Percent(Decimal::ZERO),
        };

        if trimmed.is_empty() {
            return BaseRate::Percent(Decimal::ZERO);
        }

        if trimmed.eq_ignore_ascii_case("free") {
            return BaseRate::Free;
        }

        if trimmed.contains('%') {
            let numeric = trimmed.replace('%', "");
            return match Decimal::from_str(numeric.trim()) {
                Ok(rate) => BaseRate::Percent(rate.normalize()),
                Err(_) => BaseRate::Literal(trimmed.to_string()),
            };
        }

        BaseRate::Literal(trimmed.to_string())
    }

    /// Numeric duty contribution in percent. Zero for Free and Literal.
    pub fn percent(&self) -> Decimal {
        match self {
            BaseRate::Percent(rate) => *rate,
            BaseRate::Free | BaseRate::Literal(_) => Decimal::ZERO,
        }
    }

    /// True when the rate is unit-based or unparseable, i.e. the zero
    /// contribution under-counts the real duty.
    pub fn is_approximate(&self) -> bool {
        matches!(self, BaseRate::Literal(_))
    }

    /// Display string: "5.3%", "Free", or the original text.
    pub fn display(&self) -> String {
        match self {
            BaseRate::Percent(rate) => format!("{}%", rate),
            BaseRate::Free => "Free".to_string(),
            BaseRate::Literal(text) => text.clone(),
        }
    }
}
