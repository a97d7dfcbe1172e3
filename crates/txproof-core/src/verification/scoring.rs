//! Evidence scoring and validation-result construction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::document::{
    DocumentType, ExtractedFields, ScoredValidation, StatementValidation, TransactionRow,
    ValidationResult,
};

pub const AMOUNT_WEIGHT: f64 = 0.4;
pub const DATE_WEIGHT: f64 = 0.3;
pub const TXN_ID_WEIGHT: f64 = 0.2;
pub const MODE_WEIGHT: f64 = 0.1;

/// Minimum score for a non-statement document to count as a transaction.
pub const TRANSACTION_THRESHOLD: f64 = 0.6;

/// Presence flags derived from extracted fields. The bank is not evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub has_amount: bool,
    pub has_date: bool,
    pub has_txn_id: bool,
    pub has_mode: bool,
    pub doc_type: DocumentType,
}

impl Evidence {
    pub fn from_fields(fields: &ExtractedFields, doc_type: DocumentType) -> Self {
        Self {
            has_amount: fields.amount.as_deref().is_some_and(|s| !s.is_empty()),
            has_date: fields.date.as_deref().is_some_and(|s| !s.is_empty()),
            has_txn_id: fields.transaction_id.as_deref().is_some_and(|s| !s.is_empty()),
            has_mode: fields.mode.is_some(),
            doc_type,
        }
    }
}

/// Weighted sum of the evidence flags, rounded to two decimals.
pub fn compute_confidence(evidence: &Evidence) -> f64 {
    let weighted = [
        (evidence.has_amount, AMOUNT_WEIGHT),
        (evidence.has_date, DATE_WEIGHT),
        (evidence.has_txn_id, TXN_ID_WEIGHT),
        (evidence.has_mode, MODE_WEIGHT),
    ];

    let score: f64 = weighted
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, weight)| weight)
        .sum();

    round2(score)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the scored validation for a non-statement document.
pub fn validate_extracted_data(fields: &ExtractedFields, doc_type: DocumentType) -> ValidationResult {
    let evidence = Evidence::from_fields(fields, doc_type);
    let confidence = compute_confidence(&evidence);
    let passed = confidence >= TRANSACTION_THRESHOLD;

    let mut missing_fields = Vec::new();
    if !evidence.has_amount {
        missing_fields.push("amount".to_string());
    }
    if !evidence.has_date {
        missing_fields.push("date".to_string());
    }
    if !evidence.has_txn_id {
        missing_fields.push("transaction_id".to_string());
    }

    ValidationResult::Scored(ScoredValidation {
        is_transaction: passed,
        confidence_score: confidence,
        missing_fields,
        is_valid_structure: passed,
    })
}

/// Name of the missing-evidence marker for a statement with no qualifying row.
pub fn no_transaction_marker(cap: Decimal) -> String {
    format!("no_transaction_upto_{}", cap.normalize())
}

/// Build the statement validation from rows already filtered to the cap.
pub fn validate_statement_rows(filtered_rows: &[TransactionRow], cap: Decimal) -> ValidationResult {
    let found = !filtered_rows.is_empty();

    ValidationResult::Statement(StatementValidation {
        is_transaction: found,
        missing_fields: if found {
            Vec::new()
        } else {
            vec![no_transaction_marker(cap)]
        },
        is_valid_structure: found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::PaymentMode;
    use pretty_assertions::assert_eq;

    fn evidence(mask: u8) -> Evidence {
        Evidence {
            has_amount: mask & 0b1000 != 0,
            has_date: mask & 0b0100 != 0,
            has_txn_id: mask & 0b0010 != 0,
            has_mode: mask & 0b0001 != 0,
            doc_type: DocumentType::Unknown,
        }
    }

    #[test]
    fn test_scores_are_tenths() {
        let allowed: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        for mask in 0..16u8 {
            let score = compute_confidence(&evidence(mask));
            assert!(allowed.contains(&score), "unexpected score {} for mask {:04b}", score, mask);
        }
        assert_eq!(compute_confidence(&evidence(0b1111)), 1.0);
        assert_eq!(compute_confidence(&evidence(0)), 0.0);
    }

    #[test]
    fn test_scores_are_monotonic() {
        for mask in 0..16u8 {
            for bit in [0b1000, 0b0100, 0b0010, 0b0001] {
                let before = compute_confidence(&evidence(mask));
                let after = compute_confidence(&evidence(mask | bit));
                assert!(after >= before);
            }
        }
    }

    #[test]
    fn test_bank_is_not_evidence() {
        let fields = ExtractedFields {
            bank: Some("hdfc".into()),
            ..Default::default()
        };
        let e = Evidence::from_fields(&fields, DocumentType::Unknown);
        assert_eq!(compute_confidence(&e), 0.0);
    }

    #[test]
    fn test_validate_partial_fields() {
        let fields = ExtractedFields {
            amount: Some("rs.500".into()),
            mode: Some(PaymentMode::Upi),
            ..Default::default()
        };
        let result = validate_extracted_data(&fields, DocumentType::UpiReceipt);

        assert_eq!(
            result,
            ValidationResult::Scored(ScoredValidation {
                is_transaction: false,
                confidence_score: 0.5,
                missing_fields: vec!["date".into(), "transaction_id".into()],
                is_valid_structure: false,
            })
        );
    }

    #[test]
    fn test_validate_threshold_is_inclusive() {
        // amount + txn id = 0.6
        let fields = ExtractedFields {
            amount: Some("₹10".into()),
            transaction_id: Some("123456".into()),
            ..Default::default()
        };
        let result = validate_extracted_data(&fields, DocumentType::Unknown);
        assert_eq!(result.confidence_score(), Some(0.6));
        assert!(result.is_transaction());
        assert!(result.is_valid_structure());
        assert_eq!(result.missing_fields(), ["date".to_string()]);
    }

    #[test]
    fn test_statement_validation() {
        let rows = vec![TransactionRow {
            date: "01/02/2024".into(),
            amount: Decimal::from(9000),
        }];
        let found = validate_statement_rows(&rows, Decimal::from(12000));
        assert!(found.is_transaction());
        assert!(found.missing_fields().is_empty());
        assert_eq!(found.confidence_score(), None);

        let none = validate_statement_rows(&[], Decimal::from(12000));
        assert!(!none.is_transaction());
        assert!(!none.is_valid_structure());
        assert_eq!(none.missing_fields(), ["no_transaction_upto_12000".to_string()]);
    }

    #[test]
    fn test_marker_uses_configured_cap() {
        assert_eq!(no_transaction_marker(Decimal::from(5000)), "no_transaction_upto_5000");
        assert_eq!(
            no_transaction_marker(Decimal::new(1200000, 2)),
            "no_transaction_upto_12000"
        );
    }
}
