//! Transaction reference (UTR / RRN / transaction id) extraction.

use super::patterns::TXN_ID_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Transaction id extractor. Only the digit run is returned.
pub struct TransactionIdExtractor;

impl TransactionIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TransactionIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TransactionIdExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TXN_ID_PATTERN
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let digits = caps.get(2)?;
                Some(
                    ExtractionMatch::new(digits.as_str().to_string(), "labelled_reference", full.as_str())
                        .with_position(digits.start(), digits.end()),
                )
            })
            .collect()
    }
}

/// Extract the transaction id digits from lower-cased text.
pub fn extract_transaction_id(text: &str) -> Option<String> {
    TransactionIdExtractor::new().extract(text).map(|m| m.value)
}
