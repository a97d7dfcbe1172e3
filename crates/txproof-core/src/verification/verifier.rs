//! Verification pipeline: normalize, classify, extract, validate, decide.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::config::VerificationConfig;
use crate::models::document::{DocumentType, VerificationReport};

use super::classifier::classify_document;
use super::decision::make_final_decision;
use super::normalize::normalize;
use super::rules::{extract_statement_rows, extract_transaction_fields, filter_rows_upto};
use super::scoring::{validate_extracted_data, validate_statement_rows};
use super::SUBSIDY_MAX_AMOUNT;

/// Trait for transaction-proof verification.
pub trait TransactionVerifier {
    /// Verify raw document text (normalization is applied first).
    fn verify(&self, raw_text: &str) -> VerificationReport;
}

/// Rule-based document verifier.
#[derive(Debug, Clone)]
pub struct DocumentVerifier {
    /// Largest qualifying statement row amount (inclusive).
    subsidy_max_amount: Decimal,
}

impl DocumentVerifier {
    /// Create a verifier with the default subsidy cap.
    pub fn new() -> Self {
        Self {
            subsidy_max_amount: SUBSIDY_MAX_AMOUNT,
        }
    }

    /// Create a verifier from configuration.
    pub fn from_config(config: &VerificationConfig) -> Self {
        Self::new().with_subsidy_max_amount(config.subsidy_max_amount)
    }

    /// Set the subsidy cap.
    pub fn with_subsidy_max_amount(mut self, cap: Decimal) -> Self {
        self.subsidy_max_amount = cap;
        self
    }

    pub fn subsidy_max_amount(&self) -> Decimal {
        self.subsidy_max_amount
    }

    /// Verify text that has already been normalized.
    pub fn verify_normalized(&self, text: &str) -> VerificationReport {
        let document_type = classify_document(text);

        // Fields are reported on both paths.
        let extracted_data = extract_transaction_fields(text);

        let (validation_result, statement_rows) = if document_type == DocumentType::BankStatement {
            let rows = extract_statement_rows(text);
            let filtered = filter_rows_upto(&rows, self.subsidy_max_amount);
            debug!(
                "{} of {} statement rows at or below {}",
                filtered.len(),
                rows.len(),
                self.subsidy_max_amount
            );
            (
                validate_statement_rows(&filtered, self.subsidy_max_amount),
                Some(filtered),
            )
        } else {
            (validate_extracted_data(&extracted_data, document_type), None)
        };

        let final_decision = make_final_decision(&validation_result);

        info!(
            "Verified {} document: {}",
            document_type, final_decision.final_status
        );

        VerificationReport {
            document_type,
            extracted_data,
            validation_result,
            final_decision,
            statement_rows,
        }
    }
}

impl Default for DocumentVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionVerifier for DocumentVerifier {
    fn verify(&self, raw_text: &str) -> VerificationReport {
        let text = normalize(raw_text);
        debug!("Normalized text: {} chars", text.len());
        self.verify_normalized(&text)
    }
}
