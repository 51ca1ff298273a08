//! Report generation service.
//!
//! Pulls the ledger computations together into the display contract:
//! amounts are rounded for display here (banker's rounding, configured
//! precision); everything upstream works at full precision.

use rayon::prelude::*;
use rust_decimal::Decimal;
use rxledger_shared::EngineConfig;
use rxledger_shared::types::money::to_display;

use crate::ledger::matcher::MatchedPayment;
use crate::ledger::service::LedgerService;
use crate::ledger::settlement::InvoiceSettlement;
use crate::ledger::snapshot::{PartySnapshot, StoreSnapshot};
use crate::ledger::types::NoteKind;

use super::types::{
    HistoryRowKind, InvoiceHistoryRow, PartySummary, TransactionKind, TransactionRow,
};

/// Service for generating statements and summaries.
pub struct ReportService;

impl ReportService {
    /// Full summary for one party: balance rollup plus both statement views.
    #[must_use]
    pub fn party_summary(snapshot: &PartySnapshot, config: &EngineConfig) -> PartySummary {
        let dp = config.display_decimal_places;
        let balance = LedgerService::balance(snapshot, config);
        let settlements = LedgerService::settle_invoices(snapshot);

        PartySummary {
            party_id: snapshot.party.id,
            party_name: snapshot.party.name.clone(),
            party_kind: snapshot.party.kind,
            opening: to_display(balance.opening, dp),
            total_invoiced: to_display(balance.total_invoiced, dp),
            debit_adjustments: to_display(balance.debit_adjustments, dp),
            credit_adjustments: to_display(balance.credit_adjustments, dp),
            settled: to_display(balance.settled, dp),
            balance: to_display(balance.balance, dp),
            outstanding: to_display(balance.outstanding, dp),
            advance: to_display(balance.advance, dp),
            overdue_outstanding: to_display(balance.overdue_outstanding, dp),
            is_active: balance.is_active,
            invoice_rows: Self::invoice_history(snapshot, &settlements, dp),
            timeline_rows: Self::timeline(snapshot, dp),
            warnings: snapshot.warnings.clone(),
        }
    }

    /// Summaries for every party in the store, in name order.
    ///
    /// Parties are independent, so the batch runs in parallel.
    #[must_use]
    pub fn all_party_summaries(store: &StoreSnapshot, config: &EngineConfig) -> Vec<PartySummary> {
        let mut parties = store.parties.clone();
        parties.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.id.into_inner().cmp(&b.id.into_inner()))
        });

        parties
            .into_par_iter()
            .map(|party| {
                let invoices = store
                    .invoices
                    .iter()
                    .filter(|i| i.party_id == party.id)
                    .cloned()
                    .collect();
                let notes = store
                    .notes
                    .iter()
                    .filter(|n| n.party_id == party.id)
                    .cloned()
                    .collect();
                let payments = store
                    .payments
                    .iter()
                    .filter(|p| p.party_id == party.id)
                    .cloned()
                    .collect();
                let snapshot =
                    PartySnapshot::new(store.as_of, party, invoices, notes, payments);
                Self::party_summary(&snapshot, config)
            })
            .collect()
    }

    /// The invoice history view: synthetic opening row (when the opening
    /// balance is non-zero), then one row per invoice, date-ascending.
    fn invoice_history(
        snapshot: &PartySnapshot,
        settlements: &[InvoiceSettlement],
        dp: u32,
    ) -> Vec<InvoiceHistoryRow> {
        let mut rows = Vec::with_capacity(settlements.len() + 1);

        let opening = snapshot.party.opening_balance;
        if !opening.is_zero() {
            rows.push(InvoiceHistoryRow {
                kind: HistoryRowKind::Opening,
                invoice_id: None,
                date: None,
                reference: "Opening Balance".to_string(),
                total: to_display(opening, dp),
                paid: Decimal::ZERO,
                remaining: to_display(opening, dp),
                status: None,
                payments: vec![],
            });
        }

        for settlement in settlements {
            let Some(invoice) = snapshot
                .invoices
                .iter()
                .find(|i| i.id == settlement.invoice_id)
            else {
                continue;
            };
            rows.push(InvoiceHistoryRow {
                kind: HistoryRowKind::Invoice,
                invoice_id: Some(invoice.id),
                date: Some(invoice.issue_date),
                reference: invoice.display_number().to_string(),
                total: to_display(settlement.adjusted_total, dp),
                paid: to_display(settlement.paid, dp),
                remaining: to_display(settlement.remaining, dp),
                status: Some(settlement.status),
                payments: settlement
                    .payments
                    .iter()
                    .map(|p| round_payment(p, dp))
                    .collect(),
            });
        }
        rows
    }

    /// The transaction timeline: every invoice, note, and settlement
    /// payment plus the opening balance, date-descending. The opening row
    /// has no date and sorts oldest; equal dates keep insertion order
    /// (invoices, then notes, then payments).
    fn timeline(snapshot: &PartySnapshot, dp: u32) -> Vec<TransactionRow> {
        let mut rows = Vec::new();

        let opening = snapshot.party.opening_balance;
        if !opening.is_zero() {
            rows.push(TransactionRow {
                date: None,
                kind: TransactionKind::Opening,
                reference: "Opening Balance".to_string(),
                signed_amount: to_display(opening, dp),
            });
        }

        for invoice in &snapshot.invoices {
            rows.push(TransactionRow {
                date: Some(invoice.issue_date),
                kind: TransactionKind::Invoice,
                reference: invoice.display_number().to_string(),
                signed_amount: to_display(invoice.total, dp),
            });
        }

        for note in &snapshot.notes {
            let (kind, signed) = match note.kind {
                NoteKind::Debit => (TransactionKind::DebitNote, note.amount),
                NoteKind::Credit => (TransactionKind::CreditNote, -note.amount),
            };
            rows.push(TransactionRow {
                date: Some(note.date),
                kind,
                reference: note.note_no.clone(),
                signed_amount: to_display(signed, dp),
            });
        }

        for payment in snapshot.settlement_payments() {
            rows.push(TransactionRow {
                date: Some(payment.date),
                kind: TransactionKind::Payment,
                reference: payment
                    .reference
                    .clone()
                    .unwrap_or_else(|| payment.id.to_string()),
                signed_amount: to_display(-payment.amount, dp),
            });
        }

        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

fn round_payment(payment: &MatchedPayment, dp: u32) -> MatchedPayment {
    MatchedPayment {
        payment_id: payment.payment_id,
        date: payment.date,
        reference: payment.reference.clone(),
        amount: to_display(payment.amount, dp),
        cumulative: to_display(payment.cumulative, dp),
    }
}
