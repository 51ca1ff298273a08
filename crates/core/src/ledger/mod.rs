//! Party ledger and settlement reconciliation.
//!
//! This module implements the reconciliation engine:
//! - Typed records for parties, invoices, notes, and payments
//! - Snapshot objects with data-quality sanitation
//! - Note-to-invoice adjustment resolution
//! - Payment-to-invoice matching (heuristic, isolated)
//! - Per-invoice settlement state
//! - Party-level balance aggregation
//! - Error types for the snapshot boundary

pub mod adjustment;
pub mod aggregate;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod service;
pub mod settlement;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod service_props;

pub use adjustment::{NoteAdjustment, adjusted_total};
pub use aggregate::PartyBalance;
pub use error::LedgerError;
pub use matcher::{MatchedPayment, match_payment_to_invoice};
pub use normalize::{InvoiceKeys, normalize};
pub use service::LedgerService;
pub use settlement::InvoiceSettlement;
pub use snapshot::{Anomaly, AnomalyKind, PartySnapshot, StoreSnapshot};
pub use types::{
    Invoice, Note, NoteKind, Party, PartyKind, Payment, PaymentDirection, PaymentStatus,
    SettlementStatus,
};
