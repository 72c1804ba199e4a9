//! Output formatting for CLI display
//!
//! Keeps presentation out of the resolver: breakdowns and quotes arrive
//! as plain data and leave as colored text, tables, or JSON.

use colored::Colorize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::duty::{DutyBreakdown, Quote};
use crate::utils::{format_percent, format_usd};

const REFERENCE_CAPTION: &str =
    "Note: These estimates are for reference only and do not include quantity- or unit-based duties.";

/// Render a single-code breakdown as labelled lines
pub fn format_breakdown(breakdown: &DutyBreakdown) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {}\n\n",
        breakdown.hts_number.bold(),
        breakdown.description
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Base Duty".bold(),
        breakdown.base_rate_display
    ));
    if let Some(additional) = &breakdown.additional_duties {
        output.push_str(&format!(
            "  {}: {}\n",
            "Additional Duties (schedule)".bold(),
            additional
        ));
    }
    output.push_str(&format!(
        "  {}: {}\n",
        "Section 301 Duty".bold(),
        format_percent(breakdown.section_301_rate)
    ));
    if !breakdown.reciprocal_rate.is_zero() {
        output.push_str(&format!(
            "  {}: {}\n",
            "Reciprocal Tariff".bold(),
            format_percent(breakdown.reciprocal_rate)
        ));
    }
    output.push_str(&format!(
        "  {}: {}\n",
        "Total Duty".bold(),
        format_percent(breakdown.total_rate).green().bold()
    ));

    if let (Some(value), Some(amount)) = (breakdown.line_value, breakdown.duty_amount) {
        output.push_str(&format!(
            "  {}: {} on {}\n",
            "Estimated Duty Amount".bold(),
            format_usd(amount),
            format_usd(value)
        ));
    }

    if breakdown.approximate {
        output.push_str(&format!(
            "  {} unit-based base rate, not included in the total\n",
            "⚠".yellow().bold()
        ));
    }

    output
}

/// Warning line for a code that matched no schedule entry
pub fn format_not_found(code: &str) -> String {
    format!(
        "{} HTS code {} not found. Please try again with a valid code.\n",
        "⚠".yellow().bold(),
        code.bold()
    )
}

/// Render a multi-line quote: line-item table, warnings, totals
pub fn format_quote(quote: &Quote) -> String {
    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "HTS Code")]
        hts_number: String,
        #[tabled(rename = "Base")]
        base: String,
        #[tabled(rename = "Sec 301")]
        section_301: String,
        #[tabled(rename = "Reciprocal")]
        reciprocal: String,
        #[tabled(rename = "Total")]
        total: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Duty")]
        duty: String,
    }

    let rows: Vec<LineRow> = quote
        .lines
        .iter()
        .map(|line| LineRow {
            hts_number: line.hts_number.clone(),
            base: line.base_rate_display.clone(),
            section_301: format_percent(line.section_301_rate),
            reciprocal: format_percent(line.reciprocal_rate),
            total: format_percent(line.total_rate),
            value: line.line_value.map(format_usd).unwrap_or_default(),
            duty: line.duty_amount.map(format_usd).unwrap_or_default(),
        })
        .collect();

    let mut output = String::new();

    if !rows.is_empty() {
        let table = Table::new(rows)
            .with(Style::rounded())
            .modify(Columns::new(1..), Alignment::right())
            .to_string();
        output.push_str(&table);
        output.push('\n');
    }

    for code in &quote.not_found {
        output.push_str(&format_not_found(code));
    }

    output.push_str(&format!(
        "\n{} {}\n",
        "Estimated Total Duty:".bold(),
        format_usd(quote.total_duty_amount).green().bold()
    ));

    if let Some(mpf) = quote.mpf {
        output.push_str(&format!(
            "{} {}\n",
            "MPF (all modes):".bold(),
            format_usd(mpf)
        ));
    }
    if let Some(hmf) = quote.hmf {
        if !hmf.is_zero() {
            output.push_str(&format!("{} {}\n", "HMF (ocean):".bold(), format_usd(hmf)));
        }
    }
    if quote.mpf.is_some() || quote.hmf.is_some() {
        output.push_str(&format!(
            "{} {}\n",
            "Estimated Grand Total:".bold(),
            format_usd(quote.grand_total).green().bold()
        ));
    }

    if quote.approximate {
        output.push_str(&format!(
            "{} one or more base rates are unit-based and not included in the totals\n",
            "⚠".yellow().bold()
        ));
    }

    output.push_str(&format!("\n{}\n", REFERENCE_CAPTION.dimmed()));
    output
}

/// Serialize a breakdown for `--json` output
pub fn format_breakdown_json(breakdown: &DutyBreakdown) -> String {
    serde_json::to_string_pretty(breakdown)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Serialize a quote for `--json` output
pub fn format_quote_json(quote: &Quote) -> String {
    serde_json::to_string_pretty(quote)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// `--json` body for a lookup that matched nothing
pub fn format_not_found_json(code: &str) -> String {
    serde_json::json!({ "found": false, "code": code }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn breakdown() -> DutyBreakdown {
        DutyBreakdown {
            hts_number: "3923.50.0000".to_string(),
            description: "Stoppers, lids, caps and other closures".to_string(),
            base_rate: dec!(5.3),
            base_rate_display: "5.3%".to_string(),
            additional_duties: None,
            section_301_rate: dec!(25),
            reciprocal_rate: dec!(145),
            total_rate: dec!(175.3),
            approximate: false,
            line_value: None,
            duty_amount: None,
        }
    }

    #[test]
    fn test_breakdown_shows_all_components() {
        colored::control::set_override(false);
        let text = format_breakdown(&breakdown());
        assert!(text.contains("3923.50.0000"));
        assert!(text.contains("Base Duty: 5.3%"));
        assert!(text.contains("Section 301 Duty: 25.00%"));
        assert!(text.contains("Reciprocal Tariff: 145.00%"));
        assert!(text.contains("Total Duty: 175.30%"));
    }

    #[test]
    fn test_breakdown_hides_zero_reciprocal() {
        colored::control::set_override(false);
        let mut b = breakdown();
        b.reciprocal_rate = dec!(0);
        b.total_rate = dec!(30.3);
        let text = format_breakdown(&b);
        assert!(!text.contains("Reciprocal Tariff"));
        assert!(text.contains("Total Duty: 30.30%"));
    }

    #[test]
    fn test_breakdown_json_round_trips() {
        let json = format_breakdown_json(&breakdown());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hts_number"], "3923.50.0000");
        assert_eq!(value["base_rate_display"], "5.3%");
    }

    #[test]
    fn test_not_found_json_shape() {
        let value: serde_json::Value =
            serde_json::from_str(&format_not_found_json("9999.99.9999")).unwrap();
        assert_eq!(value["found"], false);
        assert_eq!(value["code"], "9999.99.9999");
    }
}
