//! Transaction evidence verification.

pub mod classifier;
pub mod decision;
pub mod normalize;
pub mod rules;
pub mod scoring;
mod verifier;

pub use classifier::{classify_document, classify_receipt, looks_like_bank_statement};
pub use decision::{decide, make_final_decision};
pub use normalize::{clean_text, normalize, normalize_digits};
pub use rules::extract_transaction_fields;
pub use scoring::{compute_confidence, validate_extracted_data, validate_statement_rows, Evidence};
pub use verifier::{DocumentVerifier, TransactionVerifier};

use rust_decimal::Decimal;

/// Default cap on a qualifying statement row amount, in rupees.
pub const SUBSIDY_MAX_AMOUNT: Decimal = Decimal::from_parts(12000, 0, 0, false, 0);
