//! Error types for the txproof-core library.
//!
//! The verification pipeline itself is infallible; everything here belongs to
//! the pre-processing boundary (reading files, PDF extraction, OCR).

use thiserror::Error;

/// Main error type for the txproof library.
#[derive(Error, Debug)]
pub enum TxProofError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The document could not be turned into text for verification.
    #[error("pre-processing failure: {0}")]
    Preprocessing(#[from] PreprocessingError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised before the verification core is invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessingError {
    /// File type is not one of the accepted extensions.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// OCR could not produce text for the document.
    #[error("OCR failed: {0}")]
    OcrFailure(String),

    /// The text source produced nothing but whitespace.
    #[error("no text could be extracted from the document")]
    EmptyText,
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text detection or recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No OCR engine was configured or compiled in.
    #[error("no OCR engine available")]
    Unavailable,
}

impl From<OcrError> for PreprocessingError {
    fn from(err: OcrError) -> Self {
        PreprocessingError::OcrFailure(err.to_string())
    }
}

/// Result type for the txproof library.
pub type Result<T> = std::result::Result<T, TxProofError>;
