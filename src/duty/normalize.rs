//! HTS code normalization
//!
//! User-entered codes arrive in display form ("3923.50.0000") or as
//! fragments with stray punctuation. Normalization keeps the digits only;
//! anything else is discarded, never rejected.

/// Maximum digits in a full HTS number (statistical suffix included)
pub const MAX_HTS_DIGITS: usize = 10;

/// Digits used for trade-action (Section 301) matching
pub const TRADE_ACTION_DIGITS: usize = 6;

/// Strip a raw HTS code down to its digits, truncated to 10.
///
/// Empty or all-punctuation input yields an empty string, which matches
/// no schedule entry.
pub fn normalize_hts(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_HTS_DIGITS)
        .collect()
}

/// First 6 digits of a normalized code, for trade-action lookups.
///
/// Codes shorter than 6 digits stay short; the trade-action index matches
/// on exact equality, so a short prefix simply never hits a 6-digit key.
pub fn trade_action_prefix(normalized: &str) -> &str {
    // normalized is ASCII digits only, byte slicing is safe
    &normalized[..normalized.len().min(TRADE_ACTION_DIGITS)]
}
