//! Statement row extraction.
//!
//! Pairs each ledger date with the first plausible amount that follows it
//! within 200 characters. Matches do not overlap, so in dense statements a
//! date can be paired with the wrong amount or skipped.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, trace};

use super::patterns::STATEMENT_ROW_PATTERN;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::document::TransactionRow;
use crate::verification::normalize::collapse_whitespace;

/// Extractor for (date, amount) rows in statement text.
pub struct StatementRowExtractor;

impl StatementRowExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatementRowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for StatementRowExtractor {
    type Output = ExtractionMatch<TransactionRow>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let text = collapse_whitespace(&text.to_lowercase());
        let mut results = Vec::new();

        for caps in STATEMENT_ROW_PATTERN.captures_iter(&text) {
            let (Some(full), Some(date), Some(amount)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            match parse_row_amount(amount.as_str()) {
                Some(value) => results.push(
                    ExtractionMatch::new(
                        TransactionRow {
                            date: date.as_str().to_string(),
                            amount: value,
                        },
                        "ledger_row",
                        full.as_str(),
                    )
                    .with_position(full.start(), full.end()),
                ),
                None => trace!("Skipping unparseable row amount: {}", amount.as_str()),
            }
        }

        results
    }
}

/// Parse a row amount, stripping grouping commas.
pub fn parse_row_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', "")).ok()
}

/// Extract all statement rows from text.
pub fn extract_statement_rows(text: &str) -> Vec<TransactionRow> {
    let rows: Vec<TransactionRow> = StatementRowExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect();

    debug!("Extracted {} statement rows", rows.len());
    rows
}

/// Keep rows whose amount does not exceed `cap` (inclusive).
pub fn filter_rows_upto(rows: &[TransactionRow], cap: Decimal) -> Vec<TransactionRow> {
    rows.iter().filter(|row| row.amount <= cap).cloned().collect()
}
