//! # Receipt Document Model
//!
//! The single in-memory document being edited: identity fields, date,
//! payment method, note, the item ledger, the payer signature, and an
//! optional letterhead logo.
//!
//! The same type backs the Rust API and the JSON API: it is constructible
//! in Rust and deserializable from JSON, and everything downstream (the
//! renderer, the server) consumes it the same way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::{IdSource, Ledger};
use crate::signature::SignatureResult;

/// Payment method for the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Other,
}

impl PaymentMethod {
    /// Display label (Indonesian).
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tunai",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Other => "Lainnya",
        }
    }
}

fn default_from_npa() -> String {
    "-".to_string()
}

/// The full receipt document state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    /// Payee name.
    pub receiver: String,
    /// Payee membership number (NPA).
    pub receiver_npa: String,
    /// Payer name.
    pub from: String,
    /// Payer membership number, "-" when not a member.
    #[serde(default = "default_from_npa")]
    pub from_npa: String,
    /// Receipt date.
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub method: PaymentMethod,
    pub items: Ledger,
    #[serde(default)]
    pub payer_signature: SignatureResult,
    /// Optional letterhead logo as a data URI.
    #[serde(default)]
    pub logo: Option<String>,
}

impl ReceiptData {
    /// A fresh document dated `today` with one empty line item.
    pub fn new(ids: &mut dyn IdSource, today: NaiveDate) -> Self {
        Self {
            receiver: String::new(),
            receiver_npa: String::new(),
            from: String::new(),
            from_npa: default_from_npa(),
            date: today,
            note: String::new(),
            method: PaymentMethod::default(),
            items: Ledger::new(ids),
            payer_signature: SignatureResult::None,
            logo: None,
        }
    }

    /// Presence checks on the required fields. Returns the names of the
    /// fields that are still missing; empty means the receipt can be
    /// generated.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.from.trim().is_empty() {
            missing.push("from");
        }
        if self.receiver.trim().is_empty() {
            missing.push("receiver");
        }
        if self.receiver_npa.trim().is_empty() {
            missing.push("receiver_npa");
        }
        missing
    }

    /// Apply a partial update to the identity/date/method/note fields.
    pub fn apply_details(&mut self, update: DetailsUpdate) {
        if let Some(receiver) = update.receiver {
            self.receiver = receiver;
        }
        if let Some(receiver_npa) = update.receiver_npa {
            self.receiver_npa = receiver_npa;
        }
        if let Some(from) = update.from {
            self.from = from;
        }
        if let Some(from_npa) = update.from_npa {
            self.from_npa = from_npa;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(note) = update.note {
            self.note = note;
        }
        if let Some(method) = update.method {
            self.method = method;
        }
    }
}

/// Partial update for the identity/date/method/note fields; `None` fields
/// are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailsUpdate {
    pub receiver: Option<String>,
    pub receiver_npa: Option<String>,
    pub from: Option<String>,
    pub from_npa: Option<String>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub method: Option<PaymentMethod>,
}

/// Receipt identifier for a given generation date: `BEND-YYYYMMDD-001`.
pub fn receipt_number(generated_on: NaiveDate) -> String {
    format!("BEND-{}-001", generated_on.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SequentialSource;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn new_document_defaults() {
        let mut ids = SequentialSource::default();
        let data = ReceiptData::new(&mut ids, today());
        assert_eq!(data.from_npa, "-");
        assert_eq!(data.method, PaymentMethod::Cash);
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.payer_signature, SignatureResult::None);
    }

    #[test]
    fn missing_fields_reports_blank_required_fields() {
        let mut ids = SequentialSource::default();
        let mut data = ReceiptData::new(&mut ids, today());
        assert_eq!(data.missing_fields(), vec!["from", "receiver", "receiver_npa"]);

        data.apply_details(DetailsUpdate {
            from: Some("Budi Santoso".into()),
            receiver: Some("Sari Dewi".into()),
            receiver_npa: Some("24.0093".into()),
            ..Default::default()
        });
        assert!(data.missing_fields().is_empty());
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut ids = SequentialSource::default();
        let mut data = ReceiptData::new(&mut ids, today());
        data.from = "   ".into();
        assert!(data.missing_fields().contains(&"from"));
    }

    #[test]
    fn receipt_number_format() {
        assert_eq!(receipt_number(today()), "BEND-20260807-001");
    }

    #[test]
    fn json_roundtrip() {
        let mut ids = SequentialSource::default();
        let mut data = ReceiptData::new(&mut ids, today());
        data.note = "Pembayaran iuran".into();
        data.method = PaymentMethod::Transfer;

        let json = serde_json::to_string(&data).unwrap();
        let back: ReceiptData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn json_defaults_fill_optional_fields() {
        let json = r#"{
            "receiver": "Sari Dewi",
            "receiver_npa": "24.0093",
            "from": "Budi Santoso",
            "date": "2026-08-07",
            "items": {"items": [], "total": 0.0}
        }"#;
        let data: ReceiptData = serde_json::from_str(json).unwrap();
        assert_eq!(data.from_npa, "-");
        assert_eq!(data.method, PaymentMethod::Cash);
        assert_eq!(data.payer_signature, SignatureResult::None);
        assert!(data.logo.is_none());
    }
}
