//! Property-based tests for the ledger engine.
//!
//! These pin the engine's arithmetic invariants over randomized snapshots:
//! balance decomposition, settlement bounds, adjustment non-negativity,
//! overdue capping, and recomputation determinism.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::adjustment::{NoteAdjustment, adjusted_total};
use super::aggregate::PartyBalance;
use super::matcher::MatchedPayment;
use super::service::LedgerService;
use super::settlement::InvoiceSettlement;
use super::snapshot::PartySnapshot;
use super::types::{
    Invoice, Note, NoteKind, Party, PartyKind, Payment, PaymentStatus, SettlementStatus,
};
use crate::reports::ReportService;
use rxledger_shared::EngineConfig;
use rxledger_shared::types::{InvoiceId, NoteId, PartyId, PaymentId};

/// Strategy for unsigned amounts (0.00 to 10,000.00).
fn amount_cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for signed opening balances (-10,000.00 to 10,000.00).
fn signed_cents() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn note_kind() -> impl Strategy<Value = NoteKind> {
    prop_oneof![Just(NoteKind::Debit), Just(NoteKind::Credit)]
}

fn payment_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Completed),
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::Failed),
    ]
}

fn status_hint() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just("Overdue".to_string()),
        Just("Paid".to_string()),
        Just("Sent".to_string()),
    ])
}

type RawInvoice = (Decimal, Option<i64>, Option<String>);
type RawNote = (NoteKind, Decimal, Option<usize>);
type RawPayment = (Decimal, PaymentStatus, Option<usize>);

/// Strategy for a whole customer snapshot: random invoices, notes that may
/// reference them, payments that may reference them.
fn party_snapshot() -> impl Strategy<Value = PartySnapshot> {
    (
        signed_cents(),
        prop::collection::vec((amount_cents(), proptest::option::of(-30i64..30), status_hint()), 0..6),
        prop::collection::vec((note_kind(), amount_cents(), proptest::option::of(0usize..8)), 0..6),
        prop::collection::vec((amount_cents(), payment_status(), proptest::option::of(0usize..8)), 0..6),
    )
        .prop_map(|(opening, invoices, notes, payments)| {
            build_snapshot(opening, &invoices, &notes, &payments)
        })
}

fn build_snapshot(
    opening: Decimal,
    raw_invoices: &[RawInvoice],
    raw_notes: &[RawNote],
    raw_payments: &[RawPayment],
) -> PartySnapshot {
    let as_of = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let party = Party {
        id: PartyId::new(),
        name: "Prop Party".to_string(),
        kind: PartyKind::Customer,
        opening_balance: opening,
    };

    // Zero-padded numbers so no invoice number is a substring of another;
    // the ambiguity case has its own dedicated tests in the matcher.
    let invoices: Vec<Invoice> = raw_invoices
        .iter()
        .enumerate()
        .map(|(i, (total, due_offset, hint))| Invoice {
            id: InvoiceId::new(),
            system_number: format!("SI-{i:04}"),
            manual_number: None,
            party_kind: party.kind,
            party_id: party.id,
            issue_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            due_date: due_offset.map(|off| as_of + chrono::Duration::days(off)),
            total: *total,
            status_hint: hint.clone(),
        })
        .collect();

    let numbers: Vec<String> = invoices.iter().map(|i| i.system_number.clone()).collect();

    let notes: Vec<Note> = raw_notes
        .iter()
        .map(|(kind, amount, target)| Note {
            id: NoteId::new(),
            kind: *kind,
            note_no: "N-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            party_kind: party.kind,
            party_id: party.id,
            amount: *amount,
            // Out-of-range targets become unreferenced notes.
            related_invoice_no: target.and_then(|t| numbers.get(t).cloned()),
        })
        .collect();

    let payments: Vec<Payment> = raw_payments
        .iter()
        .map(|(amount, status, target)| Payment {
            id: PaymentId::new(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            direction: party.kind.settlement_direction(),
            party_kind: party.kind,
            party_id: party.id,
            invoice_id: None,
            reference: target
                .and_then(|t| numbers.get(t).cloned())
                .map(|n| format!("payment against {n}")),
            amount: *amount,
            status: *status,
        })
        .collect();

    PartySnapshot::new(as_of, party, invoices, notes, payments)
}

fn status_rank(status: SettlementStatus) -> u8 {
    match status {
        SettlementStatus::Unpaid => 0,
        SettlementStatus::PartiallyPaid => 1,
        SettlementStatus::Paid => 2,
    }
}

fn settle_with_sum(adjusted: Decimal, paid_sum: Decimal) -> InvoiceSettlement {
    let payments = if paid_sum.is_zero() {
        vec![]
    } else {
        vec![MatchedPayment {
            payment_id: PaymentId::new(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            reference: None,
            amount: paid_sum,
            cumulative: paid_sum,
        }]
    };
    InvoiceSettlement::compute(InvoiceId::new(), adjusted, payments)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* snapshot, the signed balance decomposes into exactly one
    /// of outstanding and advance.
    #[test]
    fn prop_balance_decomposition(snapshot in party_snapshot()) {
        let balance = PartyBalance::compute(&snapshot, &EngineConfig::default());
        prop_assert_eq!(balance.balance, balance.outstanding - balance.advance);
        prop_assert!(balance.outstanding.is_zero() || balance.advance.is_zero());
        prop_assert!(balance.outstanding >= Decimal::ZERO);
        prop_assert!(balance.advance >= Decimal::ZERO);
    }

    /// *For any* snapshot, the overdue figure never exceeds the total
    /// outstanding.
    #[test]
    fn prop_overdue_capped_at_outstanding(snapshot in party_snapshot()) {
        let balance = PartyBalance::compute(&snapshot, &EngineConfig::default());
        prop_assert!(balance.overdue_outstanding <= balance.outstanding);
        prop_assert!(balance.overdue_outstanding >= Decimal::ZERO);
    }

    /// *For any* snapshot, every invoice settles within its adjusted total.
    #[test]
    fn prop_paid_bounded_by_adjusted_total(snapshot in party_snapshot()) {
        for settlement in LedgerService::settle_invoices(&snapshot) {
            prop_assert!(settlement.adjusted_total >= Decimal::ZERO);
            prop_assert!(settlement.paid >= Decimal::ZERO);
            prop_assert!(settlement.paid <= settlement.adjusted_total);
            prop_assert_eq!(
                settlement.remaining,
                settlement.adjusted_total - settlement.paid
            );
        }
    }

    /// *For any* note combination, the adjusted total never goes negative,
    /// even when credit notes exceed the nominal total.
    #[test]
    fn prop_adjusted_total_never_negative(
        total in amount_cents(),
        debit in amount_cents(),
        credit in amount_cents(),
    ) {
        let adjusted = adjusted_total(total, NoteAdjustment { debit, credit });
        prop_assert!(adjusted >= Decimal::ZERO);
    }

    /// *For any* fixed adjusted total, a larger matched-payment sum never
    /// moves the status backward (Unpaid -> PartiallyPaid -> Paid only).
    #[test]
    fn prop_status_monotone_in_paid_sum(
        adjusted in amount_cents(),
        a in amount_cents(),
        b in amount_cents(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_status = settle_with_sum(adjusted, lo).status;
        let hi_status = settle_with_sum(adjusted, hi).status;
        prop_assert!(status_rank(lo_status) <= status_rank(hi_status));
    }

    /// *For any* snapshot, recomputing the summary yields byte-identical
    /// serialized output.
    #[test]
    fn prop_recompute_is_byte_identical(snapshot in party_snapshot()) {
        let config = EngineConfig::default();
        let first =
            serde_json::to_string(&ReportService::party_summary(&snapshot, &config)).unwrap();
        let second =
            serde_json::to_string(&ReportService::party_summary(&snapshot, &config)).unwrap();
        prop_assert_eq!(first, second);
    }
}
