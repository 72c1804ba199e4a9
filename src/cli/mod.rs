use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::str::FromStr;

pub mod formatters;

use crate::duty::{QuoteLine, QuoteRequest, Transport};
use crate::error::{Result, TariffError};

#[derive(Parser)]
#[command(name = "tariff")]
#[command(version, about = "U.S. HTS duty and tariff calculator")]
#[command(
    long_about = "Look up Harmonized Tariff Schedule codes and estimate the applicable duties: base rate, Section 301 trade-action duty, reciprocal tariff by origin country, and MPF/HMF processing fees on shipment value."
)]
pub struct Cli {
    /// Path to the HTS schedule CSV
    #[arg(long = "hts", global = true, default_value = "htsdata.csv")]
    pub hts_file: String,

    /// Path to the Section 301 table (.csv or .xlsx)
    #[arg(long = "sec301", global = true, default_value = "Sec301-Combined-SingleSheet.xlsx")]
    pub sec301_file: String,

    /// Policy overrides file (TOML): reciprocal tariff, fee constants
    #[arg(long = "policy", global = true)]
    pub policy_file: Option<String>,

    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a single HTS code and show its duty breakdown
    Lookup {
        /// HTS code, full or partial (e.g. 3923.50.0000)
        code: String,

        /// Country of origin
        #[arg(long)]
        origin: Option<String>,
    },

    /// Quote duties and fees for up to 10 line items
    Quote {
        /// HTS code line item (no value), repeatable
        #[arg(long = "code", value_name = "CODE")]
        codes: Vec<String>,

        /// Valued line item, repeatable
        #[arg(long = "line", value_name = "CODE:VALUE[:ORIGIN]")]
        lines: Vec<String>,

        /// Default country of origin for lines without one
        #[arg(long)]
        origin: Option<String>,

        /// Total shipment value (USD), allocated evenly across lines
        /// without an explicit value
        #[arg(long = "shipment-value", value_name = "USD")]
        shipment_value: Option<Decimal>,

        /// Method of transportation; enables MPF/HMF fee calculation
        #[arg(long, value_enum)]
        transport: Option<Transport>,
    },
}

/// Parse a `--line CODE:VALUE[:ORIGIN]` spec into a quote line
pub fn parse_line_spec(spec: &str) -> Result<QuoteLine> {
    let mut parts = spec.splitn(3, ':');
    let code = parts
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| TariffError::Validation(format!("empty line spec {:?}", spec)))?;

    let mut line = QuoteLine::new(code);

    if let Some(value_text) = parts.next() {
        let value = Decimal::from_str(value_text.trim()).map_err(|_| {
            TariffError::Validation(format!("invalid value {:?} in line {:?}", value_text, spec))
        })?;
        line.value = Some(value);
    }

    if let Some(origin) = parts.next() {
        let origin = origin.trim();
        if !origin.is_empty() {
            line.origin = Some(origin.to_string());
        }
    }

    Ok(line)
}

/// Assemble a quote request from the `quote` subcommand arguments
pub fn build_quote_request(
    codes: &[String],
    line_specs: &[String],
    origin: Option<String>,
    shipment_value: Option<Decimal>,
    transport: Option<Transport>,
) -> Result<QuoteRequest> {
    let mut lines: Vec<QuoteLine> = codes.iter().map(|code| QuoteLine::new(code.as_str())).collect();
    for spec in line_specs {
        lines.push(parse_line_spec(spec)?);
    }

    Ok(QuoteRequest {
        lines,
        shipment_value,
        origin,
        transport,
    })
}
