//! Statement rows and per-party summaries.
//!
//! Builds the two views the back-office screens print and export: the
//! invoice history (with expandable payment detail) and the full
//! transaction timeline.

pub mod service;
pub mod types;

pub use service::ReportService;
pub use types::{
    HistoryRowKind, InvoiceHistoryRow, PartySummary, TransactionKind, TransactionRow,
};
