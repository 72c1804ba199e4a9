//! Formatting utilities for CLI display
//!
//! Centralized USD currency and percentage formatting so every surface
//! renders amounts the same way.

use rust_decimal::Decimal;

/// Format a USD amount with thousands separators: "$1,234.56"
///
/// # Examples
/// ```
/// use tariff::utils::format_usd;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_usd(dec!(1234.56)), "$1,234.56");
/// assert_eq!(format_usd(dec!(-500)), "$-500.00");
/// ```
pub fn format_usd(value: Decimal) -> String {
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    let formatted = format!("{:.2}", abs_value);
    let parts: Vec<&str> = formatted.split('.').collect();

    let integer_part = parts[0];
    let decimal_part = parts.get(1).unwrap_or(&"00");

    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    format!("${}{}.{}", sign, with_separators, decimal_part)
}

/// Format a duty rate as a percentage with two decimals: "175.30%"
///
/// # Examples
/// ```
/// use tariff::utils::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(dec!(175.3)), "175.30%");
/// assert_eq!(format_percent(dec!(0)), "0.00%");
/// ```
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value)
}
