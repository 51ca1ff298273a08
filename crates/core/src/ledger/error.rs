//! Ledger error types for the snapshot boundary.

use rxledger_shared::types::PartyId;
use thiserror::Error;

/// Errors that can occur when querying a snapshot.
///
/// Computation itself is total: malformed records degrade to anomalies
/// carried on the snapshot, never hard errors, so a single bad record
/// cannot blank the whole ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No party with the given ID exists in the snapshot.
    #[error("Unknown party: {0}")]
    UnknownParty(PartyId),
}
