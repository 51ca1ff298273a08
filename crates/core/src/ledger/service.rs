//! Ledger service: the engine's computation facade.
//!
//! Pure functions over a party snapshot, no I/O and no shared state.
//! Recomputing on every snapshot refresh is the intended usage; results
//! depend on nothing but the snapshot and the configuration.

use super::adjustment::{adjusted_total, note_adjustment};
use super::aggregate::PartyBalance;
use super::matcher::matched_payments;
use super::normalize::InvoiceKeys;
use super::settlement::InvoiceSettlement;
use super::snapshot::PartySnapshot;
use super::types::Invoice;
use rxledger_shared::EngineConfig;

/// Settlement and balance computations for one party.
pub struct LedgerService;

impl LedgerService {
    /// Settlement state for every invoice in the snapshot.
    ///
    /// Ordered by issue date, system number as tiebreak, so output is
    /// deterministic regardless of store iteration order.
    #[must_use]
    pub fn settle_invoices(snapshot: &PartySnapshot) -> Vec<InvoiceSettlement> {
        let mut invoices: Vec<&Invoice> = snapshot.invoices.iter().collect();
        invoices.sort_by(|a, b| {
            a.issue_date
                .cmp(&b.issue_date)
                .then_with(|| a.system_number.cmp(&b.system_number))
        });
        invoices
            .into_iter()
            .map(|invoice| Self::settle_invoice(snapshot, invoice))
            .collect()
    }

    /// Settlement state for a single invoice of the snapshot's party.
    #[must_use]
    pub fn settle_invoice(snapshot: &PartySnapshot, invoice: &Invoice) -> InvoiceSettlement {
        let keys = InvoiceKeys::new(invoice);
        let adjustment = note_adjustment(&keys, &snapshot.notes);
        let adjusted = adjusted_total(invoice.total, adjustment);
        let payments = matched_payments(snapshot.party.kind, &keys, &snapshot.payments);
        InvoiceSettlement::compute(invoice.id, adjusted, payments)
    }

    /// Party-level balance rollup.
    #[must_use]
    pub fn balance(snapshot: &PartySnapshot, config: &EngineConfig) -> PartyBalance {
        PartyBalance::compute(snapshot, config)
    }
}
