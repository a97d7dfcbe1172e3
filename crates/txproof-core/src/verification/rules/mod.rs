//! Rule-based field extractors for transaction proofs.

pub mod amounts;
pub mod bank;
pub mod dates;
pub mod mode;
pub mod patterns;
pub mod statement;
pub mod txn_id;

pub use amounts::{extract_amount, AmountExtractor};
pub use bank::detect_bank;
pub use dates::{extract_date, DateExtractor};
pub use mode::detect_mode;
pub use statement::{extract_statement_rows, filter_rows_upto, parse_row_amount, StatementRowExtractor};
pub use txn_id::{extract_transaction_id, TransactionIdExtractor};
pub use patterns::*;

use crate::models::document::ExtractedFields;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value together with the rule and text that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Run every field extractor over the text.
///
/// Each sub-extraction is independent; a miss leaves that field `None`.
pub fn extract_transaction_fields(text: &str) -> ExtractedFields {
    let text = text.to_lowercase();

    ExtractedFields {
        amount: extract_amount(&text),
        transaction_id: extract_transaction_id(&text),
        date: extract_date(&text),
        mode: detect_mode(&text),
        bank: detect_bank(&text).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::PaymentMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_upi_receipt_fields() {
        let text = "google pay upi transaction id 4021 1133 paid to shop ₹250 completed 3 feb 2024 upi transaction id: 402111334455";
        let fields = extract_transaction_fields(text);

        assert_eq!(
            fields,
            ExtractedFields {
                amount: Some("₹250".to_string()),
                transaction_id: Some("402111334455".to_string()),
                date: Some("3 feb 2024".to_string()),
                mode: Some(PaymentMode::Upi),
                bank: Some("google pay".to_string()),
            }
        );
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let fields = extract_transaction_fields("NEFT Rs. 7,000 UTR 1234567 HDFC 01-02-2024");
        assert_eq!(fields.amount.as_deref(), Some("rs. 7,000"));
        assert_eq!(fields.transaction_id.as_deref(), Some("1234567"));
        assert_eq!(fields.mode, Some(PaymentMode::Neft));
        assert_eq!(fields.bank.as_deref(), Some("hdfc"));
        assert_eq!(fields.date.as_deref(), Some("01-02-2024"));
    }

    #[test]
    fn test_extract_empty_text() {
        assert_eq!(extract_transaction_fields(""), ExtractedFields::default());
    }
}
