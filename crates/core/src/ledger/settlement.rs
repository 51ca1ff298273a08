//! Per-invoice settlement state.

use rust_decimal::Decimal;
use rxledger_shared::types::InvoiceId;
use rxledger_shared::types::money::clamp_non_negative;
use serde::{Deserialize, Serialize};

use super::matcher::MatchedPayment;
use super::types::SettlementStatus;

/// Settlement state of one invoice against its matched payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSettlement {
    /// The invoice ID.
    pub invoice_id: InvoiceId,
    /// Nominal total after matched note adjustments.
    pub adjusted_total: Decimal,
    /// Amount counted as paid toward this invoice, capped at the adjusted
    /// total. Overpayment never inflates an invoice past 100%; the excess
    /// surfaces as advance at the party level, where the raw sum is used.
    pub paid: Decimal,
    /// Amount still owed on this invoice.
    pub remaining: Decimal,
    /// Paid / partially paid / unpaid.
    pub status: SettlementStatus,
    /// Matched payments, date-ascending with running cumulative.
    pub payments: Vec<MatchedPayment>,
}

impl InvoiceSettlement {
    /// Computes the settlement state from an adjusted total and the
    /// invoice's matched payments.
    #[must_use]
    pub fn compute(
        invoice_id: InvoiceId,
        adjusted_total: Decimal,
        payments: Vec<MatchedPayment>,
    ) -> Self {
        let paid_raw: Decimal = payments.iter().map(|p| p.amount).sum();
        let paid = clamp_non_negative(paid_raw).min(adjusted_total);
        let remaining = adjusted_total - paid;
        let status = if remaining <= Decimal::ZERO {
            SettlementStatus::Paid
        } else if paid > Decimal::ZERO {
            SettlementStatus::PartiallyPaid
        } else {
            SettlementStatus::Unpaid
        };
        Self {
            invoice_id,
            adjusted_total,
            paid,
            remaining,
            status,
            payments,
        }
    }
}
