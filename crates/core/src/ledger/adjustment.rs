//! Invoice adjustment resolution.
//!
//! Debit and credit notes reference invoices by number string. Matched note
//! amounts adjust the invoice's nominal total; unmatched notes never touch
//! any invoice and count only at the party level.

use rust_decimal::Decimal;

use super::normalize::InvoiceKeys;
use super::types::{Note, NoteKind};

/// Summed note amounts matched to one invoice, per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteAdjustment {
    /// Total of matched debit notes.
    pub debit: Decimal,
    /// Total of matched credit notes.
    pub credit: Decimal,
}

/// Sums the notes whose `related_invoice_no` matches the invoice's keys.
#[must_use]
pub fn note_adjustment(keys: &InvoiceKeys, notes: &[Note]) -> NoteAdjustment {
    let mut adjustment = NoteAdjustment::default();
    for note in notes {
        let Some(related) = note.related_invoice_no.as_deref() else {
            continue;
        };
        if !keys.matches_exact(related) {
            continue;
        }
        match note.kind {
            NoteKind::Debit => adjustment.debit += note.amount,
            NoteKind::Credit => adjustment.credit += note.amount,
        }
    }
    adjustment
}

/// Applies a note adjustment to a nominal invoice total.
///
/// Never negative: credit notes can cancel an invoice but not flip it into
/// a refund at the invoice level. The surplus still reaches the party
/// balance through the party-level note sums.
#[must_use]
pub fn adjusted_total(nominal_total: Decimal, adjustment: NoteAdjustment) -> Decimal {
    (nominal_total + adjustment.debit - adjustment.credit).max(Decimal::ZERO)
}
