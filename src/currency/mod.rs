//! German-locale EUR formatting and lenient decimal parsing for user input.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_SYMBOL: &str = "€";
const DISPLAY_SCALE: u32 = 2;

/// Formats an amount as `1.234,56 €`. Negative values carry a leading `-`.
pub fn format_eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!(
        "{sign}{},{fraction} {CURRENCY_SYMBOL}",
        group_thousands(integer)
    )
}

/// Like [`format_eur`] but prefixes non-negative amounts with `+`.
pub fn format_signed_eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format_eur(rounded)
    } else {
        format!("+{}", format_eur(rounded))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parses `1234,56`, `1234.56` or `1.234,56`. Returns `None` for empty or invalid input,
/// including exponent notation such as `1e3`.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim().trim_end_matches(CURRENCY_SYMBOL).trim();
    if trimmed.is_empty() || trimmed.contains(['e', 'E']) {
        return None;
    }
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let normalized = normalized.strip_prefix('+').unwrap_or(&normalized);
    Decimal::from_str(normalized).ok()
}

/// Renders a value for an input field: zero becomes empty, decimals use a comma.
pub fn format_input_number(value: Decimal) -> String {
    if value.is_zero() {
        return String::new();
    }
    value.normalize().to_string().replace('.', ",")
}
