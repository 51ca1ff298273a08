//! Ledger domain records.
//!
//! Typed views of the four collections the engine consumes: parties,
//! invoices, debit/credit notes, and payments. Records arrive as read
//! snapshots from the host application's document store; the engine never
//! writes them back.
//!
//! Amount fields deserialize leniently (number or numeric string, garbage
//! coerces to zero) because the upstream CRUD screens are not consistent
//! about how they persist numbers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rxledger_shared::types::{InvoiceId, NoteId, PartyId, PaymentId};
use serde::{Deserialize, Serialize};

/// Party kind: a ledger account is either a customer or a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// A customer we sell to.
    Customer,
    /// A supplier we buy from.
    Supplier,
}

impl PartyKind {
    /// The payment direction that settles this party's invoices.
    ///
    /// Customers pay us (`In`); we pay suppliers (`Out`). The direction is
    /// derived from the party kind, never chosen per payment.
    #[must_use]
    pub const fn settlement_direction(self) -> PaymentDirection {
        match self {
            Self::Customer => PaymentDirection::In,
            Self::Supplier => PaymentDirection::Out,
        }
    }
}

/// A customer or supplier account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// The party ID.
    pub id: PartyId,
    /// Display name.
    pub name: String,
    /// Customer or supplier.
    pub kind: PartyKind,
    /// Signed starting balance before any recorded transaction.
    ///
    /// Positive means the party owes us; negative means we hold their money
    /// as an advance. The meaning mirrors for suppliers.
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub opening_balance: Decimal,
}

/// A sale or purchase invoice.
///
/// The total is nominal: adjustments happen via notes, not edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// The invoice ID.
    pub id: InvoiceId,
    /// System-assigned invoice number.
    pub system_number: String,
    /// Operator-entered invoice number, if any.
    #[serde(default)]
    pub manual_number: Option<String>,
    /// Kind of the party this invoice belongs to.
    pub party_kind: PartyKind,
    /// The party this invoice belongs to.
    pub party_id: PartyId,
    /// Date the invoice was issued.
    pub issue_date: NaiveDate,
    /// Due date, if one was captured.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Nominal total before note adjustments.
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub total: Decimal,
    /// Free-text status hint from the entry screen (e.g. "Overdue").
    #[serde(default)]
    pub status_hint: Option<String>,
}

impl Invoice {
    /// The number shown on statements: the manual number when the operator
    /// entered one, otherwise the system number.
    #[must_use]
    pub fn display_number(&self) -> &str {
        match self.manual_number.as_deref() {
            Some(manual) if !manual.trim().is_empty() => manual,
            _ => &self.system_number,
        }
    }
}

/// Note kind: debit notes raise a party's balance, credit notes lower it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Debit note (increases the party's payable/receivable).
    Debit,
    /// Credit note (decreases the party's payable/receivable).
    Credit,
}

/// A debit or credit note, optionally tied to an invoice by number string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// The note ID.
    pub id: NoteId,
    /// Debit or credit.
    pub kind: NoteKind,
    /// Note number shown on statements.
    pub note_no: String,
    /// Date the note was raised.
    pub date: NaiveDate,
    /// Kind of the party this note belongs to.
    pub party_kind: PartyKind,
    /// The party this note belongs to.
    pub party_id: PartyId,
    /// Unsigned amount; the kind decides the sign.
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub amount: Decimal,
    /// Free-text invoice number this note adjusts.
    ///
    /// There is no foreign key: the string is correlated against invoice
    /// system/manual numbers at computation time. A note that matches no
    /// invoice still counts once at the party level.
    #[serde(default)]
    pub related_invoice_no: Option<String>,
}

/// Payment direction relative to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentDirection {
    /// Money received.
    In,
    /// Money paid out.
    Out,
}

/// Payment lifecycle status.
///
/// Only completed payments participate in balance math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Settled payment.
    Completed,
    /// Recorded but not yet cleared.
    Pending,
    /// Bounced or cancelled.
    Failed,
}

/// A received or issued payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// The payment ID.
    pub id: PaymentId,
    /// Date the payment was recorded.
    pub date: NaiveDate,
    /// Direction relative to us.
    pub direction: PaymentDirection,
    /// Kind of the party this payment belongs to.
    pub party_kind: PartyKind,
    /// The party this payment belongs to.
    pub party_id: PartyId,
    /// Direct link to the settled invoice, when the entry screen captured one.
    #[serde(default)]
    pub invoice_id: Option<InvoiceId>,
    /// Free-text reference; may embed an invoice number.
    #[serde(default)]
    pub reference: Option<String>,
    /// Unsigned amount.
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub amount: Decimal,
    /// Lifecycle status.
    pub status: PaymentStatus,
}

impl Payment {
    /// True if this payment settles invoices for the given party kind:
    /// it is completed and flows in the party's settlement direction.
    #[must_use]
    pub fn settles_for(&self, kind: PartyKind) -> bool {
        self.status == PaymentStatus::Completed
            && self.direction == kind.settlement_direction()
    }
}

/// Settlement status of an invoice, decided solely by the remaining amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Nothing remains to be paid.
    Paid,
    /// Some, but not all, of the adjusted total is paid.
    PartiallyPaid,
    /// No payment has been matched.
    Unpaid,
}

mod lenient {
    //! Tolerant deserialization for amount fields.

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use std::str::FromStr;

    /// Accepts a JSON number or numeric string; anything unparseable
    /// coerces to zero with a warning instead of failing the record.
    pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(coerce(&value))
    }

    fn coerce(value: &serde_json::Value) -> Decimal {
        let parsed = match value {
            serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
            serde_json::Value::Null => Some(Decimal::ZERO),
            _ => None,
        };
        parsed.unwrap_or_else(|| {
            tracing::warn!(raw = %value, "unparseable amount field, coercing to zero");
            Decimal::ZERO
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_settlement_direction() {
        assert_eq!(
            PartyKind::Customer.settlement_direction(),
            PaymentDirection::In
        );
        assert_eq!(
            PartyKind::Supplier.settlement_direction(),
            PaymentDirection::Out
        );
    }

    #[test]
    fn test_settles_for_requires_completed_and_direction() {
        let payment = Payment {
            id: PaymentId::new(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            direction: PaymentDirection::In,
            party_kind: PartyKind::Customer,
            party_id: PartyId::new(),
            invoice_id: None,
            reference: None,
            amount: dec!(100),
            status: PaymentStatus::Completed,
        };
        assert!(payment.settles_for(PartyKind::Customer));
        assert!(!payment.settles_for(PartyKind::Supplier));

        let pending = Payment {
            status: PaymentStatus::Pending,
            ..payment.clone()
        };
        assert!(!pending.settles_for(PartyKind::Customer));

        let failed = Payment {
            status: PaymentStatus::Failed,
            ..payment
        };
        assert!(!failed.settles_for(PartyKind::Customer));
    }

    #[test]
    fn test_display_number_prefers_manual() {
        let mut invoice: Invoice = serde_json::from_value(serde_json::json!({
            "id": InvoiceId::new(),
            "system_number": "SI-0042",
            "manual_number": "INV/2026/007",
            "party_kind": "customer",
            "party_id": PartyId::new(),
            "issue_date": "2026-02-10",
            "total": 1500,
        }))
        .unwrap();
        assert_eq!(invoice.display_number(), "INV/2026/007");

        invoice.manual_number = Some("   ".to_string());
        assert_eq!(invoice.display_number(), "SI-0042");

        invoice.manual_number = None;
        assert_eq!(invoice.display_number(), "SI-0042");
    }

    #[test]
    fn test_amount_accepts_number_and_string() {
        let note: Note = serde_json::from_value(serde_json::json!({
            "id": NoteId::new(),
            "kind": "credit",
            "note_no": "CN-1",
            "date": "2026-01-05",
            "party_kind": "supplier",
            "party_id": PartyId::new(),
            "amount": "250.75",
        }))
        .unwrap();
        assert_eq!(note.amount, dec!(250.75));

        let note: Note = serde_json::from_value(serde_json::json!({
            "id": NoteId::new(),
            "kind": "debit",
            "note_no": "DN-1",
            "date": "2026-01-05",
            "party_kind": "supplier",
            "party_id": PartyId::new(),
            "amount": 99.5,
        }))
        .unwrap();
        assert_eq!(note.amount, dec!(99.5));
    }

    #[test]
    fn test_malformed_amount_coerces_to_zero() {
        let party: Party = serde_json::from_value(serde_json::json!({
            "id": PartyId::new(),
            "name": "Apex Pharma",
            "kind": "customer",
            "opening_balance": "n/a",
        }))
        .unwrap();
        assert_eq!(party.opening_balance, Decimal::ZERO);
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let party: Party = serde_json::from_value(serde_json::json!({
            "id": PartyId::new(),
            "name": "Apex Pharma",
            "kind": "customer",
        }))
        .unwrap();
        assert_eq!(party.opening_balance, Decimal::ZERO);
    }
}
