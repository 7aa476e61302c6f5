//! Display formatting for document content. Rounding happens here and only
//! here; stored totals stay exact.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as `1 234,56 EUR`: ASCII-space thousands separator,
/// comma decimal, two decimals, halves rounded away from zero.
pub fn fmt_eur(amount: Decimal) -> String {
    let cents = (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i128()
        .unwrap_or(0);
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let int_part = abs / 100;
    let frac_part = abs % 100;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    format!("{}{},{:02} EUR", sign, grouped, frac_part)
}

/// `DD/MM/YYYY`.
pub fn fmt_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Quantity without trailing zeros, comma decimal separator.
pub fn fmt_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string().replace('.', ",")
}

/// Percent without trailing zeros.
pub fn fmt_percent(percent: Decimal) -> String {
    format!("{}%", percent.normalize().to_string().replace('.', ","))
}
