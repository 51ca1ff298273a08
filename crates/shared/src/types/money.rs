//! Decimal helpers for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts in the system are `rust_decimal::Decimal`. The ledger is
//! single-currency, so no currency tag travels with the amount.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount for display.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors
/// across many small additions.
#[must_use]
pub fn to_display(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Clamps a negative amount to zero.
///
/// Upstream CRUD screens occasionally persist negative amount fields; those
/// records must not push aggregates below zero.
#[must_use]
pub fn clamp_non_negative(amount: Decimal) -> Decimal {
    if amount.is_sign_negative() {
        Decimal::ZERO
    } else {
        amount
    }
}
