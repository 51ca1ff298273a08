//! Matching-key normalization.
//!
//! Notes and payments reference invoices by free-text number strings, not
//! foreign keys. All correlation happens on normalized keys: trimmed,
//! lowercased.

use rxledger_shared::types::InvoiceId;

use super::types::Invoice;

/// Normalizes a free-text matching key: trim + lowercase.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Precomputed normalized matching keys for one invoice.
///
/// An invoice is addressable by its system number and, when present, its
/// manual number. Keys that normalize to the empty string are dropped: an
/// empty key would substring-match every payment reference.
#[derive(Debug, Clone)]
pub struct InvoiceKeys {
    /// The invoice these keys belong to.
    pub invoice_id: InvoiceId,
    keys: Vec<String>,
}

impl InvoiceKeys {
    /// Builds the key set for an invoice.
    #[must_use]
    pub fn new(invoice: &Invoice) -> Self {
        let mut keys = Vec::with_capacity(2);
        let system = normalize(&invoice.system_number);
        if !system.is_empty() {
            keys.push(system);
        }
        if let Some(manual) = invoice.manual_number.as_deref() {
            let manual = normalize(manual);
            if !manual.is_empty() && !keys.contains(&manual) {
                keys.push(manual);
            }
        }
        Self {
            invoice_id: invoice.id,
            keys,
        }
    }

    /// True if the candidate, once normalized, equals either key.
    ///
    /// Used for note correlation, which requires the whole field to be the
    /// invoice number.
    #[must_use]
    pub fn matches_exact(&self, candidate: &str) -> bool {
        let candidate = normalize(candidate);
        !candidate.is_empty() && self.keys.iter().any(|k| *k == candidate)
    }

    /// True if the normalized reference contains either key as a substring.
    ///
    /// Used for payment references, which embed invoice numbers in free
    /// text ("NEFT 448812 against SI-0042").
    #[must_use]
    pub fn matched_by_substring(&self, reference: &str) -> bool {
        let reference = normalize(reference);
        !reference.is_empty() && self.keys.iter().any(|k| reference.contains(k))
    }
}
