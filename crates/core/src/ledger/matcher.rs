//! Payment-to-invoice matching.
//!
//! There is no foreign key from payment to invoice in the source data: most
//! payments carry the invoice number inside a free-text reference. All of
//! that heuristic lives in [`match_payment_to_invoice`] so a future schema
//! with a real foreign key can replace it without touching the rest of the
//! engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rxledger_shared::types::PaymentId;
use serde::{Deserialize, Serialize};

use super::normalize::InvoiceKeys;
use super::types::{Payment, PartyKind};

/// Decides whether a payment settles the given invoice.
///
/// Rule, first match wins:
/// 1. the payment's `invoice_id` equals the invoice's ID;
/// 2. otherwise, the normalized reference contains the invoice's normalized
///    system or manual number as a substring.
///
/// A reference that embeds overlapping invoice numbers (e.g. "INV-001"
/// inside "INV-0010") can satisfy more than one invoice's query; the
/// caller's iteration order decides, matching the legacy screens. That
/// ambiguity is a property of the data, not resolved here.
#[must_use]
pub fn match_payment_to_invoice(payment: &Payment, keys: &InvoiceKeys) -> bool {
    if payment.invoice_id == Some(keys.invoice_id) {
        return true;
    }
    payment
        .reference
        .as_deref()
        .is_some_and(|reference| keys.matched_by_substring(reference))
}

/// A payment matched to an invoice, with the running paid-to-date after it.
///
/// The cumulative column is what statements print next to each payment; it
/// is the raw running sum, not capped at the invoice total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedPayment {
    /// The payment ID.
    pub payment_id: PaymentId,
    /// Payment date.
    pub date: NaiveDate,
    /// Free-text reference as recorded.
    pub reference: Option<String>,
    /// Payment amount.
    pub amount: Decimal,
    /// Running sum of matched amounts up to and including this payment.
    pub cumulative: Decimal,
}

/// All settlement payments matching the invoice, date-ascending, each with
/// the running cumulative paid-to-date.
///
/// Only completed payments flowing in the party's settlement direction are
/// considered. Equal dates keep their snapshot order.
#[must_use]
pub fn matched_payments(
    party_kind: PartyKind,
    keys: &InvoiceKeys,
    payments: &[Payment],
) -> Vec<MatchedPayment> {
    let mut matched: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.settles_for(party_kind) && match_payment_to_invoice(p, keys))
        .collect();
    matched.sort_by_key(|p| p.date);

    let mut cumulative = Decimal::ZERO;
    matched
        .into_iter()
        .map(|p| {
            cumulative += p.amount;
            MatchedPayment {
                payment_id: p.id,
                date: p.date,
                reference: p.reference.clone(),
                amount: p.amount,
                cumulative,
            }
        })
        .collect()
}
