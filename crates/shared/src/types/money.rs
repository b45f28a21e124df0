//! Rupiah formatting for statement and API output.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts stay as `rust_decimal::Decimal` until they are turned into text here.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency prefix used on every formatted amount.
pub const RUPIAH_PREFIX: &str = "Rp";

/// Thousands separator (Indonesian convention).
const THOUSANDS_SEPARATOR: char = '.';

/// Formats an amount as whole Rupiah with full-stop thousands grouping.
///
/// Fractions are rounded half-to-even, so `1234567.5` becomes `Rp 1.234.568`
/// and `2.5` becomes `Rp 2`. Negative amounts keep their sign after the prefix
/// (`Rp -500`).
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let grouped = group_thousands(&rounded.abs().trunc().to_string());

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{RUPIAH_PREFIX} -{grouped}")
    } else {
        format!("{RUPIAH_PREFIX} {grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }

    out
}
