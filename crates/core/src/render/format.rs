use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::settings::NumberGrouping;

/// Round to `dp` places, halves away from zero (12.5 → 13, -12.5 → -13).
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Insert thousands separators into a string of ASCII digits.
pub fn group_digits(digits: &str, grouping: NumberGrouping) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let step = match grouping {
        NumberGrouping::Indian => 2,
        NumberGrouping::Western => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

/// Unsigned grouped amount with exactly `dp` decimals: 123274.125 → "1,23,274.13".
fn format_magnitude(value: Decimal, dp: u32, grouping: NumberGrouping) -> String {
    let rounded = round_half_away(value.abs(), dp);
    let text = format!("{:.prec$}", rounded, prec = dp as usize);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = group_digits(int_part, grouping);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Loss test shared by the rendered signs and the CSS classes. Applied to the
/// unrounded value: -0.3 renders as `-₹0`.
fn is_loss(value: Decimal) -> bool {
    value < Decimal::ZERO
}

/// Grouped number without a currency glyph; negative values get a leading `-`.
pub fn format_number(value: Decimal, dp: u32, grouping: NumberGrouping) -> String {
    let magnitude = format_magnitude(value, dp, grouping);
    if is_loss(value) {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

/// `₹1,23,274` style amount. Negative amounts render as `-₹…`.
pub fn format_currency(value: Decimal, symbol: &str, dp: u32, grouping: NumberGrouping) -> String {
    let magnitude = format_magnitude(value, dp, grouping);
    if is_loss(value) {
        format!("-{symbol}{magnitude}")
    } else {
        format!("{symbol}{magnitude}")
    }
}

/// Currency amount with an explicit `+` for non-negative values.
pub fn format_signed_currency(value: Decimal, symbol: &str, dp: u32, grouping: NumberGrouping) -> String {
    let text = format_currency(value, symbol, dp, grouping);
    if is_loss(value) {
        text
    } else {
        format!("+{text}")
    }
}

/// Two-decimal percentage with an explicit `+` for non-negative values.
/// Undefined percentages (nothing invested) render as `n/a`.
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(pct) => {
            let magnitude = round_half_away(pct.abs(), 2);
            let sign = if is_loss(pct) { "-" } else { "+" };
            format!("{sign}{magnitude:.2}%")
        }
        None => "n/a".to_string(),
    }
}

/// NAV as published, without trailing zeros: 12.50000 → "12.5".
pub fn format_nav(nav: Decimal) -> String {
    nav.normalize().to_string()
}

/// CSS class for a P&L figure; zero counts as positive.
pub fn pl_class(value: Decimal) -> &'static str {
    if !is_loss(value) {
        "positive"
    } else {
        "negative"
    }
}

/// CSS class for the net P&L summary row; zero counts as profit.
pub fn summary_class(value: Decimal) -> &'static str {
    if !is_loss(value) {
        "profit"
    } else {
        "loss"
    }
}
