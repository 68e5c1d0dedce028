//! Pricing policy using exact decimal arithmetic.
//!
//! All currency math goes through `rust_decimal::Decimal`; only display
//! formatting rounds to two fraction digits.

use rust_decimal::Decimal;

/// Subtotals strictly above this amount ship free.
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::new(100_00, 2)
}

/// Flat shipping rate charged at or below the free-shipping threshold.
#[must_use]
pub fn flat_shipping_rate() -> Decimal {
    Decimal::new(9_99, 2)
}

/// Shipping cost for a given subtotal.
///
/// The comparison is strict: a subtotal of exactly 100.00 still pays the
/// flat rate.
#[must_use]
pub fn shipping_for(subtotal: Decimal) -> Decimal {
    if subtotal > free_shipping_threshold() {
        Decimal::ZERO
    } else {
        flat_shipping_rate()
    }
}

/// Format an amount for display (e.g., "$109.98").
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}
