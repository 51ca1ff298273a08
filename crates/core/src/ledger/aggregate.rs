//! Party-level balance aggregation.
//!
//! The rollup re-derives everything from the snapshot on every call; there
//! is no cached per-invoice state to drift out of sync. Note adjustments
//! are applied once, at party level, against nominal invoice totals:
//! applying them per invoice as well would subtract matched notes twice.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rxledger_shared::EngineConfig;

use super::snapshot::PartySnapshot;
use super::types::{Invoice, NoteKind};

/// Party-level balance rollup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyBalance {
    /// Signed starting balance.
    pub opening: Decimal,
    /// Sum of nominal invoice totals.
    pub total_invoiced: Decimal,
    /// Sum of all debit notes.
    pub debit_adjustments: Decimal,
    /// Sum of all credit notes.
    pub credit_adjustments: Decimal,
    /// Sum of settlement payments, raw and uncapped.
    pub settled: Decimal,
    /// `opening + total_invoiced + debit − credit − settled`.
    pub balance: Decimal,
    /// Amount the party owes us; zero when the balance is negative.
    pub outstanding: Decimal,
    /// Amount we hold for the party; zero when the balance is positive.
    pub advance: Decimal,
    /// Outstanding attributable to overdue invoices, capped at outstanding.
    pub overdue_outstanding: Decimal,
    /// True if the account has any activity at all.
    pub is_active: bool,
}

impl PartyBalance {
    /// Rolls a party snapshot up into one signed balance and its splits.
    #[must_use]
    pub fn compute(snapshot: &PartySnapshot, config: &EngineConfig) -> Self {
        let opening = snapshot.party.opening_balance;
        let total_invoiced: Decimal = snapshot.invoices.iter().map(|i| i.total).sum();

        let mut debit_adjustments = Decimal::ZERO;
        let mut credit_adjustments = Decimal::ZERO;
        for note in &snapshot.notes {
            match note.kind {
                NoteKind::Debit => debit_adjustments += note.amount,
                NoteKind::Credit => credit_adjustments += note.amount,
            }
        }

        let settled: Decimal = snapshot.settlement_payments().map(|p| p.amount).sum();

        let balance =
            opening + total_invoiced + debit_adjustments - credit_adjustments - settled;
        let outstanding = balance.max(Decimal::ZERO);
        let advance = (-balance).max(Decimal::ZERO);

        let overdue_total: Decimal = snapshot
            .invoices
            .iter()
            .filter(|i| is_overdue(i, snapshot.as_of, config.overdue_grace_days))
            .map(|i| i.total)
            .sum();
        let overdue_outstanding = overdue_total.min(outstanding);

        let is_active = !opening.is_zero()
            || total_invoiced > Decimal::ZERO
            || settled > Decimal::ZERO
            || debit_adjustments > Decimal::ZERO
            || credit_adjustments > Decimal::ZERO;

        Self {
            opening,
            total_invoiced,
            debit_adjustments,
            credit_adjustments,
            settled,
            balance,
            outstanding,
            advance,
            overdue_outstanding,
            is_active,
        }
    }
}

/// Whether an invoice counts as overdue on the given date.
///
/// The entry screen's free-text hint wins in both directions: "Overdue"
/// forces the flag, "Paid" suppresses it. Otherwise an invoice is overdue
/// once its due date is more than `grace_days` behind the snapshot date.
#[must_use]
pub fn is_overdue(invoice: &Invoice, as_of: NaiveDate, grace_days: i64) -> bool {
    let hint = invoice.status_hint.as_deref();
    if hint_is(hint, "overdue") {
        return true;
    }
    if hint_is(hint, "paid") {
        return false;
    }
    invoice
        .due_date
        .is_some_and(|due| (as_of - due).num_days() > grace_days)
}

fn hint_is(hint: Option<&str>, expected: &str) -> bool {
    hint.is_some_and(|h| h.trim().eq_ignore_ascii_case(expected))
}
