//! Core business logic for Rxledger.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. The engine is a projection: it consumes read snapshots of
//! the party/invoice/note/payment collections and derives settlement state
//! and balances. It performs no writes and no I/O.
//!
//! # Modules
//!
//! - `ledger` - Party ledger and settlement reconciliation
//! - `reports` - Statement rows and per-party summaries

pub mod ledger;
pub mod reports;
