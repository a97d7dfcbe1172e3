//! Final decision from a validation result.

use tracing::debug;

use crate::models::document::{FinalDecision, FinalStatus, ValidationResult};

/// Scores at or above this are `Valid`.
pub const VALID_THRESHOLD: f64 = 0.75;

/// Scores at or above this (and below [`VALID_THRESHOLD`]) need review.
pub const REVIEW_THRESHOLD: f64 = 0.5;

/// Map a confidence score to a status.
pub fn decide(score: f64) -> FinalStatus {
    if score >= VALID_THRESHOLD {
        FinalStatus::Valid
    } else if score >= REVIEW_THRESHOLD {
        FinalStatus::NeedsReview
    } else {
        FinalStatus::Invalid
    }
}

/// Score the decision reads from a validation result.
pub fn decision_score(validation: &ValidationResult) -> f64 {
    match validation {
        ValidationResult::Scored(v) => v.confidence_score,
        // Statement results carry no score and are decided at 0.0, so a
        // statement is Invalid even when a qualifying row was found.
        ValidationResult::Statement(_) => 0.0,
    }
}

/// Produce the final status and reason.
pub fn make_final_decision(validation: &ValidationResult) -> FinalDecision {
    let score = decision_score(validation);
    let status = decide(score);
    debug!("Decision score {:.2} -> {}", score, status);
    FinalDecision::from(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{ScoredValidation, StatementValidation};

    #[test]
    fn test_boundaries() {
        assert_eq!(decide(1.0), FinalStatus::Valid);
        assert_eq!(decide(0.75), FinalStatus::Valid);
        assert_eq!(decide(0.74), FinalStatus::NeedsReview);
        assert_eq!(decide(0.50), FinalStatus::NeedsReview);
        assert_eq!(decide(0.49), FinalStatus::Invalid);
        assert_eq!(decide(0.0), FinalStatus::Invalid);
    }

    #[test]
    fn test_reasons() {
        let scored = |score| {
            ValidationResult::Scored(ScoredValidation {
                is_transaction: score >= 0.6,
                confidence_score: score,
                missing_fields: vec![],
                is_valid_structure: score >= 0.6,
            })
        };

        assert_eq!(make_final_decision(&scored(0.8)).reason, "High confidence transaction proof");
        assert_eq!(make_final_decision(&scored(0.5)).reason, "Partial transaction evidence");
        assert_eq!(make_final_decision(&scored(0.1)).reason, "Insufficient transaction evidence");
    }

    #[test]
    fn test_statement_defaults_to_zero() {
        let validation = ValidationResult::Statement(StatementValidation {
            is_transaction: true,
            missing_fields: vec![],
            is_valid_structure: true,
        });
        assert_eq!(decision_score(&validation), 0.0);
        assert_eq!(make_final_decision(&validation).final_status, FinalStatus::Invalid);
    }
}
