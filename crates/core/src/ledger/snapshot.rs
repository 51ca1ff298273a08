//! Snapshot objects.
//!
//! The engine consumes explicit point-in-time snapshots, never ambient
//! caches: every computation is a pure function of the snapshot it is
//! handed, and recomputation on a fresh snapshot is always safe.
//!
//! Snapshot construction is also where data sanitation happens: negative
//! amounts clamp to zero and records belonging to other parties are
//! dropped. Each coercion is reported as a non-fatal [`Anomaly`] so a
//! single bad record cannot blank the whole ledger.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rxledger_shared::types::PartyId;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::types::{Invoice, Note, Party, Payment};

/// Kind of data-quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// A negative amount field was clamped to zero.
    NegativeAmount,
    /// A transaction references a party that does not exist.
    OrphanedRecord,
}

/// A non-fatal data-quality finding from snapshot sanitation.
///
/// Anomalies never abort a computation; they ride along on the snapshot
/// for the caller to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// What kind of problem was found.
    pub kind: AnomalyKind,
    /// Human-readable description naming the offending record.
    pub message: String,
}

/// Point-in-time view of the whole store.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// The date the snapshot was taken; overdue checks compare against it.
    pub as_of: NaiveDate,
    /// All parties.
    pub parties: Vec<Party>,
    /// All invoices.
    pub invoices: Vec<Invoice>,
    /// All debit/credit notes.
    pub notes: Vec<Note>,
    /// All payments.
    pub payments: Vec<Payment>,
}

impl StoreSnapshot {
    /// Creates a snapshot of the full record collections.
    #[must_use]
    pub fn new(
        as_of: NaiveDate,
        parties: Vec<Party>,
        invoices: Vec<Invoice>,
        notes: Vec<Note>,
        payments: Vec<Payment>,
    ) -> Self {
        Self {
            as_of,
            parties,
            invoices,
            notes,
            payments,
        }
    }

    /// Extracts one party's sanitized ledger view.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownParty`] if the party is not in the
    /// snapshot.
    pub fn party_ledger(&self, party_id: PartyId) -> Result<PartySnapshot, LedgerError> {
        let party = self
            .parties
            .iter()
            .find(|p| p.id == party_id)
            .ok_or(LedgerError::UnknownParty(party_id))?;
        Ok(PartySnapshot::new(
            self.as_of,
            party.clone(),
            self.invoices.clone(),
            self.notes.clone(),
            self.payments.clone(),
        ))
    }

    /// Reports transactions whose `party_id` matches no party.
    ///
    /// Dangling records are excluded from every party summary rather than
    /// crashing a computation; this surfaces them for cleanup.
    #[must_use]
    pub fn orphaned_records(&self) -> Vec<Anomaly> {
        let known: HashSet<PartyId> = self.parties.iter().map(|p| p.id).collect();
        let mut anomalies = Vec::new();

        for invoice in &self.invoices {
            if !known.contains(&invoice.party_id) {
                anomalies.push(orphan(
                    "invoice",
                    &invoice.system_number,
                    invoice.party_id,
                ));
            }
        }
        for note in &self.notes {
            if !known.contains(&note.party_id) {
                anomalies.push(orphan("note", &note.note_no, note.party_id));
            }
        }
        for payment in &self.payments {
            if !known.contains(&payment.party_id) {
                anomalies.push(orphan("payment", &payment.id.to_string(), payment.party_id));
            }
        }
        anomalies
    }
}

fn orphan(label: &str, reference: &str, party_id: PartyId) -> Anomaly {
    let message = format!("{label} {reference} references unknown party {party_id}");
    tracing::warn!(%message);
    Anomaly {
        kind: AnomalyKind::OrphanedRecord,
        message,
    }
}

/// One party's pre-filtered, sanitized ledger view.
///
/// Construction accepts either pre-filtered collections or the full store
/// collections; records belonging to other parties are dropped.
#[derive(Debug, Clone)]
pub struct PartySnapshot {
    /// The date the snapshot was taken.
    pub as_of: NaiveDate,
    /// The party this view belongs to.
    pub party: Party,
    /// The party's invoices, amounts sanitized.
    pub invoices: Vec<Invoice>,
    /// The party's notes, amounts sanitized.
    pub notes: Vec<Note>,
    /// The party's payments (all directions and statuses), amounts sanitized.
    pub payments: Vec<Payment>,
    /// Data-quality findings from sanitation.
    pub warnings: Vec<Anomaly>,
}

impl PartySnapshot {
    /// Builds a sanitized view for one party.
    #[must_use]
    pub fn new(
        as_of: NaiveDate,
        party: Party,
        invoices: Vec<Invoice>,
        notes: Vec<Note>,
        payments: Vec<Payment>,
    ) -> Self {
        let mut warnings = Vec::new();

        let mut invoices: Vec<Invoice> = invoices
            .into_iter()
            .filter(|i| i.party_id == party.id && i.party_kind == party.kind)
            .collect();
        for invoice in &mut invoices {
            clamp_negative(
                "invoice",
                &invoice.system_number,
                &mut invoice.total,
                &mut warnings,
            );
        }

        let mut notes: Vec<Note> = notes
            .into_iter()
            .filter(|n| n.party_id == party.id && n.party_kind == party.kind)
            .collect();
        for note in &mut notes {
            clamp_negative("note", &note.note_no, &mut note.amount, &mut warnings);
        }

        let mut payments: Vec<Payment> = payments
            .into_iter()
            .filter(|p| p.party_id == party.id && p.party_kind == party.kind)
            .collect();
        for payment in &mut payments {
            clamp_negative(
                "payment",
                &payment.id.to_string(),
                &mut payment.amount,
                &mut warnings,
            );
        }

        Self {
            as_of,
            party,
            invoices,
            notes,
            payments,
            warnings,
        }
    }

    /// Payments that count toward settlement: completed, flowing in the
    /// party's settlement direction.
    pub fn settlement_payments(&self) -> impl Iterator<Item = &Payment> {
        self.payments
            .iter()
            .filter(|p| p.settles_for(self.party.kind))
    }
}

fn clamp_negative(
    label: &str,
    reference: &str,
    amount: &mut Decimal,
    warnings: &mut Vec<Anomaly>,
) {
    if amount.is_sign_negative() {
        let message = format!("{label} {reference} has negative amount {amount}, clamped to zero");
        tracing::warn!(%message);
        warnings.push(Anomaly {
            kind: AnomalyKind::NegativeAmount,
            message,
        });
        *amount = Decimal::ZERO;
    }
}
