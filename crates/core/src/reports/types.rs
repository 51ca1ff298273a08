//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rxledger_shared::types::{InvoiceId, PartyId};
use serde::{Deserialize, Serialize};

use crate::ledger::matcher::MatchedPayment;
use crate::ledger::snapshot::Anomaly;
use crate::ledger::types::{PartyKind, SettlementStatus};

/// Kind of invoice-history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRowKind {
    /// The synthetic opening-balance row.
    Opening,
    /// A real invoice.
    Invoice,
}

/// One row of the invoice history view.
///
/// The opening row, present only when the opening balance is non-zero,
/// carries the signed opening amount in `total` and `remaining` (negative
/// means the party paid in advance) and has no status or payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceHistoryRow {
    /// Opening row or invoice row.
    pub kind: HistoryRowKind,
    /// The invoice, absent on the opening row.
    pub invoice_id: Option<InvoiceId>,
    /// Issue date, absent on the opening row.
    pub date: Option<NaiveDate>,
    /// Display label: invoice number or "Opening Balance".
    pub reference: String,
    /// Adjusted total (signed opening amount on the opening row).
    pub total: Decimal,
    /// Amount paid toward this row.
    pub paid: Decimal,
    /// Amount remaining on this row.
    pub remaining: Decimal,
    /// Settlement status, absent on the opening row.
    pub status: Option<SettlementStatus>,
    /// Matched payment detail, date-ascending with running cumulative.
    pub payments: Vec<MatchedPayment>,
}

/// Kind of timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Opening balance.
    Opening,
    /// Invoice raised.
    Invoice,
    /// Debit note.
    DebitNote,
    /// Credit note.
    CreditNote,
    /// Settlement payment.
    Payment,
}

/// One row of the transaction timeline fed to statement printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Transaction date; the opening row has none and sorts oldest.
    pub date: Option<NaiveDate>,
    /// What kind of transaction this is.
    pub kind: TransactionKind,
    /// Display reference (invoice number, note number, payment reference).
    pub reference: String,
    /// Positive raises the party's balance, negative lowers it.
    pub signed_amount: Decimal,
}

/// Per-party summary: the engine's full output contract.
///
/// Everything the party screens show is here: the balance rollup, the
/// invoice history with settlement state, the statement timeline, and any
/// data-quality warnings from sanitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySummary {
    /// The party ID.
    pub party_id: PartyId,
    /// Party display name.
    pub party_name: String,
    /// Customer or supplier.
    pub party_kind: PartyKind,
    /// Signed starting balance.
    pub opening: Decimal,
    /// Sum of nominal invoice totals.
    pub total_invoiced: Decimal,
    /// Sum of all debit notes.
    pub debit_adjustments: Decimal,
    /// Sum of all credit notes.
    pub credit_adjustments: Decimal,
    /// Sum of settlement payments (raw, uncapped).
    pub settled: Decimal,
    /// Signed balance.
    pub balance: Decimal,
    /// Amount the party owes us.
    pub outstanding: Decimal,
    /// Amount we hold for the party.
    pub advance: Decimal,
    /// Outstanding attributable to overdue invoices.
    pub overdue_outstanding: Decimal,
    /// True if the account has any activity.
    pub is_active: bool,
    /// Invoice history rows, opening row first, then date-ascending.
    pub invoice_rows: Vec<InvoiceHistoryRow>,
    /// Transaction timeline, date-descending.
    pub timeline_rows: Vec<TransactionRow>,
    /// Data-quality findings from snapshot sanitation.
    pub warnings: Vec<Anomaly>,
}
