use rust_decimal::{Decimal, RoundingStrategy};

// ---------------------------------------------------------------------------
// Price formatting: USD display with two decimals and thousands separators
// ---------------------------------------------------------------------------

/// Format an amount the way the storefront displays prices, e.g. `$1,234.50`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}.{}", grouped, cents)
    } else {
        format!("${}.{}", grouped, cents)
    }
}

/// Price of `quantity` units.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}
