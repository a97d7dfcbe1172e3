//! Document type classification.
//!
//! Two stages in fixed order: the statement keyword test always runs first
//! and overrides the receipt test.

use tracing::debug;

use super::rules::patterns::{STATEMENT_KEYWORDS, STATEMENT_KEYWORD_THRESHOLD};
use crate::models::document::DocumentType;

/// Number of distinct statement keywords present in the text.
pub fn statement_keyword_hits(text: &str) -> usize {
    let text = text.to_lowercase();
    STATEMENT_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count()
}

/// Stage 1: does the text look like a bank statement?
pub fn looks_like_bank_statement(text: &str) -> bool {
    statement_keyword_hits(text) >= STATEMENT_KEYWORD_THRESHOLD
}

/// Stage 2: receipt classification for non-statement text.
pub fn classify_receipt(text: &str) -> DocumentType {
    let text = text.to_lowercase();

    if text.contains("neft") && !text.contains("statement") {
        return DocumentType::NeftAck;
    }
    if text.contains("upi") || text.contains("google pay") {
        return DocumentType::UpiReceipt;
    }
    DocumentType::Unknown
}

/// Classify a document.
pub fn classify_document(text: &str) -> DocumentType {
    let doc_type = if looks_like_bank_statement(text) {
        DocumentType::BankStatement
    } else {
        classify_receipt(text)
    };

    debug!("Classified document as {}", doc_type);
    doc_type
}
