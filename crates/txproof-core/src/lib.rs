//! Core library for transaction-proof verification.
//!
//! This crate provides:
//! - Text normalization of OCR output (case, whitespace, Unicode digits)
//! - Document classification (bank statement, NEFT acknowledgment, UPI receipt)
//! - Rule-based field extraction (amount, date, transaction id, mode, bank)
//! - Evidence scoring and the final Valid / Needs Review / Invalid decision
//! - Text sources for PDFs, images (OCR) and plain text

pub mod error;
pub mod models;
pub mod pdf;
pub mod ocr;
pub mod source;
pub mod verification;

pub use error::{TxProofError, PreprocessingError, Result};
pub use models::config::TxProofConfig;
pub use models::document::{
    DocumentType, ExtractedFields, FinalDecision, FinalStatus, PaymentMode, ResponseEnvelope,
    TransactionRow, ValidationResult, VerificationReport,
};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use ocr::{OcrBackend, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use source::{SourceKind, TextSource};
pub use verification::{DocumentVerifier, TransactionVerifier, SUBSIDY_MAX_AMOUNT};
